use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a response: report lines for text, pretty JSON otherwise.
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> Vec<String>,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(text(value).join("\n")),
    }
}

/// Print a response in the requested format. Empty text output prints
/// nothing at all.
pub fn output<T, F>(value: &T, format: OutputFormat, text: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Vec<String>,
{
    let rendered = render(value, format, text)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Report {
        lines: Vec<String>,
    }

    fn report() -> Report {
        Report {
            lines: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn text_joins_lines() {
        let rendered = render(&report(), OutputFormat::Text, |r| r.lines.clone()).unwrap();
        assert_eq!(rendered, "a\nb");
    }

    #[test]
    fn json_ignores_text_renderer() {
        let rendered = render(&report(), OutputFormat::Json, |_| unreachable!()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["lines"][1], "b");
    }

    #[test]
    fn empty_text_is_empty() {
        let rendered = render(&Report { lines: vec![] }, OutputFormat::Text, |r| r.lines.clone()).unwrap();
        assert!(rendered.is_empty());
    }
}
