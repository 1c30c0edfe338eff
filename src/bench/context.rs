//! Context assembly from retrieved passages.

use crate::backend::Passage;

/// Assembles an ordered passage list into one bounded context string.
///
/// Both bounds are checked against the string accumulated *so far*, not
/// against the candidate passage, so the final context may overshoot
/// `max_chars` by up to one passage. That is long-standing, deliberate
/// behavior: the last included source is kept whole rather than truncated,
/// and downstream evaluation depends on the exact cut point. Do not tighten
/// the check.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    max_chars: usize,
    max_sources: Option<usize>,
}

impl ContextAssembler {
    /// Create an assembler bounded by character length only.
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            max_sources: None,
        }
    }

    /// Additionally bound the number of sources.
    pub fn with_max_sources(mut self, max_sources: usize) -> Self {
        self.max_sources = Some(max_sources);
        self
    }

    /// Build the context string. Passages beyond either bound are silently
    /// dropped; an empty passage list yields an empty string.
    pub fn assemble(&self, passages: &[Passage]) -> String {
        let mut context = String::new();
        let mut char_count = 0usize;
        let mut source_index = 1usize;

        for passage in passages {
            if char_count >= self.max_chars {
                break;
            }
            if let Some(max) = self.max_sources {
                if source_index > max {
                    break;
                }
            }

            let block = format!(
                "\n\n----------\n\nSource #{}: \n\"{}\"",
                source_index, passage.text
            );
            char_count += block.chars().count();
            context.push_str(&block);
            source_index += 1;
        }

        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passages(texts: &[&str]) -> Vec<Passage> {
        texts.iter().map(|t| Passage::new(t.to_string())).collect()
    }

    #[test]
    fn numbers_sources_in_order() {
        let assembler = ContextAssembler::new(10_000);
        let context = assembler.assemble(&passages(&["first", "second"]));

        assert!(context.contains("Source #1: \n\"first\""));
        assert!(context.contains("Source #2: \n\"second\""));
        assert!(context.find("Source #1").unwrap() < context.find("Source #2").unwrap());
    }

    #[test]
    fn empty_passages_yield_empty_context() {
        let assembler = ContextAssembler::new(10_000);
        assert_eq!(assembler.assemble(&[]), "");
    }

    #[test]
    fn max_sources_caps_block_count() {
        let assembler = ContextAssembler::new(10_000).with_max_sources(2);
        let context = assembler.assemble(&passages(&["a", "b", "c", "d"]));

        assert_eq!(context.matches("Source #").count(), 2);
        assert!(context.contains("\"a\""));
        assert!(context.contains("\"b\""));
        assert!(!context.contains("\"c\""));
    }

    #[test]
    fn length_bound_checked_before_append() {
        // Each block is ~40 chars; with a 50-char budget the second passage
        // still lands (the check sees only the first block), the third does not.
        let assembler = ContextAssembler::new(50);
        let context = assembler.assemble(&passages(&["one", "two", "three"]));

        assert!(context.contains("\"one\""));
        assert!(context.contains("\"two\""));
        assert!(!context.contains("\"three\""));
    }

    #[test]
    fn overshoot_is_bounded_by_one_passage() {
        let long = "x".repeat(500);
        let assembler = ContextAssembler::new(100);
        let context = assembler.assemble(&passages(&[&long, &long]));

        // First passage always lands (bound checked against the empty
        // string); the second is dropped because the bound is now exceeded.
        assert_eq!(context.matches("Source #").count(), 1);
        assert!(context.chars().count() < 100 + 500 + 40);
    }

    #[test]
    fn zero_budget_appends_nothing() {
        let assembler = ContextAssembler::new(0);
        let context = assembler.assemble(&passages(&["only"]));
        // Accumulated length before the first append is 0, which is not
        // below a zero bound, so nothing is appended.
        assert_eq!(context, "");
    }
}
