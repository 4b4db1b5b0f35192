//! Keyword overlap between a resume and a job description.

use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use crate::normalize;

/// Standard English stop-word list used for count vectorization.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Terms present in both texts and their share of the joint vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordOverlap {
    /// Alphabetical.
    pub matched: Vec<String>,
    /// `matched.len() / max(vocabulary_size, 1)`, always in [0, 1].
    pub ratio: f64,
    pub vocabulary_size: usize,
}

/// term -> (count in job description, count in resume)
type Vocabulary = BTreeMap<String, (u32, u32)>;

fn count_terms(vocab: &mut Vocabulary, text: &str, slot: usize) {
    for word in normalize::tokenize(text) {
        if stop_words().contains(word.as_str()) {
            continue;
        }
        let counts = vocab.entry(word).or_insert((0, 0));
        if slot == 0 {
            counts.0 += 1;
        } else {
            counts.1 += 1;
        }
    }
}

/// Build one vocabulary over both texts (stop words removed) and report the
/// terms whose count is positive on both sides.
pub fn keyword_overlap(resume: &str, jd: &str) -> KeywordOverlap {
    let mut vocab = Vocabulary::new();
    count_terms(&mut vocab, jd, 0);
    count_terms(&mut vocab, resume, 1);

    let matched: Vec<String> = vocab
        .iter()
        .filter(|(_, &(jd_count, resume_count))| jd_count > 0 && resume_count > 0)
        .map(|(term, _)| term.clone())
        .collect();

    let ratio = matched.len() as f64 / vocab.len().max(1) as f64;
    KeywordOverlap {
        matched,
        ratio,
        vocabulary_size: vocab.len(),
    }
}
