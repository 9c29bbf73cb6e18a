use crate::commands::{read_details, resolve};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use courier_builder::BuilderSession;
use courier_message::SlotId;
use courier_tree::{first_visible, next_visible};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Connection details JSON file
    pub input: PathBuf,
}

pub fn outline(args: OutlineArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let details = read_details(&resolve(cwd, &args.input))?;
    let mut session = BuilderSession::from_details(&details, config.builder);
    session.validate();

    for line in outline_lines(&session) {
        println!("{}", line);
    }

    Ok(())
}

/// One line per component in outline order, indented by depth; components
/// with problems are marked
fn outline_lines(session: &BuilderSession) -> Vec<String> {
    let document = session.document();
    let outline = session.outline();
    let expanded: HashSet<SlotId> = document.ids().into_iter().collect();

    let mut problem_counts: HashMap<&SlotId, usize> = HashMap::new();
    for problem in session.problems() {
        *problem_counts.entry(&problem.component_id).or_default() += 1;
    }

    let mut lines = Vec::new();
    let mut current = first_visible(&outline);

    while let Some(id) = current {
        if let Some(component) = document.find(&id) {
            let depth = document.ancestor_ids(&id).map_or(0, |ancestors| ancestors.len());
            let label = component.component_type().label();

            let marker = match problem_counts.get(&id) {
                Some(count) => format!(" {} {}", "✗".red(), count),
                None => String::new(),
            };

            lines.push(format!(
                "{}{} {}{}",
                "  ".repeat(depth),
                label.bold(),
                id.as_str().dimmed(),
                marker
            ));
        }

        current = next_visible(&outline, &expanded, &id);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_builder::BuilderOptions;
    use courier_message::ConnectionDetails;
    use serde_json::json;

    #[test]
    fn test_outline_follows_document_order() {
        colored::control::set_override(false);

        let details: ConnectionDetails = serde_json::from_value(json!({
            "content": "hello",
            "componentRows": [{
                "id": "row-1",
                "components": [{ "id": "b", "type": 2, "label": "", "style": 5, "url": "https://example.com" }]
            }]
        }))
        .unwrap();
        let mut session = BuilderSession::from_details(&details, BuilderOptions::default());
        session.validate();

        let lines = outline_lines(&session);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Discord Message"));
        assert!(lines[1].starts_with("  Text"));
        assert!(lines[2].starts_with("  Action Row"));
        assert!(lines[3].starts_with("    Button"));
        assert!(lines[3].ends_with("✗ 1"));
    }
}
