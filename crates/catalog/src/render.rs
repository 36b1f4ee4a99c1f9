use shared::domain::{Article, CalloutTone, ContentBlock};

/// Plain-text rendering of one block. Unknown blocks render to nothing.
pub fn render_block(block: &ContentBlock) -> Option<String> {
    match block {
        ContentBlock::Paragraph { text } => Some(text.clone()),
        ContentBlock::Heading { text, level } => {
            let marks = "#".repeat(usize::from((*level).clamp(1, 6)));
            Some(format!("{marks} {text}"))
        }
        ContentBlock::Callout { tone, text } => {
            let label = match tone {
                CalloutTone::Info => "NOTE",
                CalloutTone::Warning => "WARNING",
                CalloutTone::Insight => "INSIGHT",
            };
            Some(format!("[{label}] {text}"))
        }
        ContentBlock::Formula {
            expression,
            caption,
        } => Some(match caption {
            Some(caption) => format!("    {expression}\n    ({caption})"),
            None => format!("    {expression}"),
        }),
        ContentBlock::List { items, ordered } => Some(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    if *ordered {
                        format!("{}. {item}", idx + 1)
                    } else {
                        format!("- {item}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        ContentBlock::Code { language, code } => {
            let fence_lang = language.as_deref().unwrap_or_default();
            Some(format!("```{fence_lang}\n{code}\n```"))
        }
        ContentBlock::Unknown => None,
    }
}

pub fn render_article(article: &Article) -> String {
    let mut sections = vec![format!("# {}", article.title)];
    sections.extend(article.content.iter().filter_map(render_block));
    sections.join("\n\n")
}
