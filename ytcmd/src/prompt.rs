use crate::console::{InputProvider, OutputSink};
use crate::error::{Error, Result};
use crate::models::{QualityCatalog, QualityLabel};

const CHOICE_PROMPT: &str = "Enter the number of your choice: ";

/// Outcome of reading one menu answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based position in the menu.
    Index(usize),
    OutOfRange,
    NotANumber
}

/// Parses a 1-based menu answer against a menu of `len` entries.
pub fn parse_choice(input: &str, len: usize) -> Choice {
    let Ok(number) = input.trim().parse::<i64>() else {
        return Choice::NotANumber;
    };
    match usize::try_from(number) {
        Ok(n) if (1..=len).contains(&n) => Choice::Index(n - 1),
        _ => Choice::OutOfRange
    }
}

/// Uses `requested` when the catalog offers it, otherwise asks until a valid entry is picked.
pub fn resolve_quality<I, O>(
    catalog: &QualityCatalog,
    requested: Option<QualityLabel>,
    input: &mut I,
    output: &mut O
) -> Result<QualityLabel>
where
    I: InputProvider,
    O: OutputSink
{
    match requested {
        Some(label) if catalog.contains(label) => return Ok(label),
        Some(label) => {
            output.line("");
            output.line(&format!("{label} is not available for this video."));
        }
        None => {}
    }

    output.line("");
    output.line("Please select a quality from the available options:");

    loop {
        let answer = input
            .read_line(CHOICE_PROMPT)
            .map_err(Error::Input)?
            .ok_or(Error::InputClosed)?;

        match parse_choice(&answer, catalog.len()) {
            Choice::Index(index) => return Ok(catalog.labels()[index]),
            Choice::OutOfRange => output.line("Invalid choice. Please try again."),
            Choice::NotANumber => output.line("Please enter a valid number.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::{RecordingSink, ScriptedInput};
    use yt_dlp::Format;

    fn catalog(heights: &[u32]) -> QualityCatalog {
        let formats: Vec<Format> = heights
            .iter()
            .map(|h| Format {
                format_id: h.to_string(),
                height: Some(*h),
                acodec: Some("mp4a.40.2".to_string()),
                ..Format::default()
            })
            .collect();
        QualityCatalog::build(&formats, false)
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Choice::Index(0));
        assert_eq!(parse_choice(" 3 ", 3), Choice::Index(2));
        assert_eq!(parse_choice("0", 3), Choice::OutOfRange);
        assert_eq!(parse_choice("4", 3), Choice::OutOfRange);
        assert_eq!(parse_choice("-1", 3), Choice::OutOfRange);
        assert_eq!(parse_choice("1", 0), Choice::OutOfRange);
        assert_eq!(parse_choice("abc", 3), Choice::NotANumber);
        assert_eq!(parse_choice("2.0", 3), Choice::NotANumber);
        assert_eq!(parse_choice("", 3), Choice::NotANumber);
    }

    #[test]
    fn test_resolve_retries_until_valid() {
        let catalog = catalog(&[480, 720, 1080]);
        let mut input = ScriptedInput::new(["abc", "99", "2"]);
        let mut output = RecordingSink::default();

        let label = resolve_quality(&catalog, None, &mut input, &mut output).unwrap();

        assert_eq!(label, catalog.labels()[1]);
        assert_eq!(label.to_string(), "720p");
        assert_eq!(input.prompts.len(), 3);
        assert!(output.contains("Please enter a valid number."));
        assert!(output.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_resolve_requested_present_skips_prompt() {
        let catalog = catalog(&[480, 720, 1080]);
        let mut input = ScriptedInput::default();
        let mut output = RecordingSink::default();

        let label = resolve_quality(&catalog, QualityLabel::new(720), &mut input, &mut output).unwrap();

        assert_eq!(label.height(), 720);
        assert!(input.prompts.is_empty());
        assert!(output.lines.is_empty());
    }

    #[test]
    fn test_resolve_requested_missing_prompts() {
        let catalog = catalog(&[360, 720]);
        let mut input = ScriptedInput::new(["1"]);
        let mut output = RecordingSink::default();

        let label = resolve_quality(&catalog, QualityLabel::new(1080), &mut input, &mut output).unwrap();

        assert_eq!(label.height(), 360);
        assert!(output.contains("1080p is not available"));
        assert_eq!(input.prompts, vec![CHOICE_PROMPT]);
    }

    #[test]
    fn test_resolve_input_closed() {
        let catalog = catalog(&[360]);
        let mut input = ScriptedInput::new(["nope"]);
        let mut output = RecordingSink::default();

        let err = resolve_quality(&catalog, None, &mut input, &mut output).unwrap_err();
        assert!(matches!(err, Error::InputClosed));
    }
}
