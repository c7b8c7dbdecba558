/// A completed word: which displayed slot it came from and what it was
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub index: usize,
    pub word: String,
}

/// Decide whether `input` completes one of the displayed words.
///
/// Only outer whitespace is ignored; comparison is exact, case-sensitive and
/// whole-word. When a word is displayed more than once the earliest slot wins.
pub fn evaluate(input: &str, displayed: &[String]) -> Option<Match> {
    let typed = input.trim();
    if typed.is_empty() {
        return None;
    }

    displayed
        .iter()
        .position(|word| word == typed)
        .map(|index| Match {
            index,
            word: displayed[index].clone(),
        })
}
