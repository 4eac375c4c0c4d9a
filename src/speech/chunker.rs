//! Utterance chunking for speech synthesis
//!
//! TTS endpoints behave best on short inputs, so an utterance is split into
//! sentence-aligned chunks before synthesis. Sentences are never split in
//! the middle: a single sentence longer than the limit is emitted whole
//! rather than truncated.

/// Split an utterance into ordered, bounded chunks.
///
/// Sentences are cut on terminal punctuation (`.`, `!`, `?`), keeping the
/// punctuation with its sentence, then packed greedily: a chunk absorbs
/// sentences until the next one would push it past `max_len` bytes.
///
/// Whitespace-only input yields no chunks; input without terminal
/// punctuation is a single chunk.
pub fn chunk_utterance(text: &str, max_len: usize) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(trimmed) {
        if current.is_empty() {
            current.push_str(sentence);
        } else if current.len() + 1 + sentence.len() <= max_len {
            current.push(' ');
            current.push_str(sentence);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split text into sentences on `.`, `!`, `?`, keeping the terminal
/// punctuation (including runs like `...` or `?!`) with its sentence.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut in_terminal = false;

    for (i, c) in text.char_indices() {
        let terminal = matches!(c, '.' | '!' | '?');
        if in_terminal && !terminal {
            // the punctuation run ended just before this character
            let sentence = text[start..i].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = i;
        }
        in_terminal = terminal;
    }

    let last = text[start..].trim();
    if !last.is_empty() {
        sentences.push(last);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation() {
        let sentences = split_sentences("First one. Second one! Third one?");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third one?"]);
    }

    #[test]
    fn test_punctuation_runs_stay_together() {
        let sentences = split_sentences("Wait... really?! Yes.");
        assert_eq!(sentences, vec!["Wait...", "really?!", "Yes."]);
    }

    #[test]
    fn test_greedy_packing() {
        // sentence lengths 80 / 90 / 60 with a 220-byte limit pack as 1+2, 3
        let s1 = format!("{}.", "a".repeat(79));
        let s2 = format!("{}.", "b".repeat(89));
        let s3 = format!("{}.", "c".repeat(59));
        let utterance = format!("{} {} {}", s1, s2, s3);

        let chunks = chunk_utterance(&utterance, 220);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{} {}", s1, s2));
        assert_eq!(chunks[1], s3);
    }

    #[test]
    fn test_chunks_respect_the_bound() {
        let text = "One sentence here. Another sentence there. And one more to go. \
                    Plus a fourth. And a fifth one too.";
        for chunk in chunk_utterance(text, 50) {
            assert!(chunk.len() <= 50, "chunk too long: {:?}", chunk);
        }
    }

    #[test]
    fn test_oversized_sentence_is_emitted_whole() {
        let long = format!("{}.", "word ".repeat(60).trim_end());
        let chunks = chunk_utterance(&long, 40);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], long);
        assert!(chunks[0].len() > 40);
    }

    #[test]
    fn test_oversized_sentence_between_normal_ones() {
        let long = "x".repeat(100);
        let text = format!("Short start. {}. Short end.", long);
        let chunks = chunk_utterance(&text, 40);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "Short start.");
        assert_eq!(chunks[1], format!("{}.", long));
        assert_eq!(chunks[2], "Short end.");
    }

    #[test]
    fn test_no_terminal_punctuation_is_one_chunk() {
        let chunks = chunk_utterance("no punctuation at all", 220);
        assert_eq!(chunks, vec!["no punctuation at all"]);
    }

    #[test]
    fn test_whitespace_only_yields_nothing() {
        assert!(chunk_utterance("", 220).is_empty());
        assert!(chunk_utterance("   \n\t ", 220).is_empty());
    }

    #[test]
    fn test_chunks_are_never_empty() {
        let chunks = chunk_utterance("One. Two. Three.", 8);
        assert!(!chunks.is_empty());
        assert!(chunks.iter().all(|c| !c.trim().is_empty()));
    }
}
