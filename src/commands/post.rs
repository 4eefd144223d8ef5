use std::io::{BufRead, Write};

use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

use crate::client::IssueGateway;
use crate::constants::{EDITABLE_SEPARATOR, FALLBACK_EDITOR};
use crate::error::{ErrorContext, SummarizerResult};
use crate::summarizer_error;

/// Let the user edit `summary` and post what they keep as a comment on `key`.
///
/// An empty edit asks whether to skip posting; declining reopens the editor.
pub async fn edit_summary_and_post(
    gateway: &dyn IssueGateway,
    key: &str,
    summary: &str,
) -> SummarizerResult<bool> {
    let template = format!("\n\n{}\n\n{}", EDITABLE_SEPARATOR, summary);

    loop {
        let edited = extract_edited(&open_in_editor(&template).await?);

        if edited.is_empty() {
            let stdin = std::io::stdin();
            if should_reedit(&mut stdin.lock(), &mut std::io::stdout()) {
                continue;
            }
            println!("Skipping update for {}.", key);
            return Ok(false);
        }

        gateway.post_comment(key, &edited).await?;
        println!("Posted update on {}.", key);
        return Ok(true);
    }
}

/// Keep only the text written above the separator.
pub fn extract_edited(content: &str) -> String {
    content
        .split(EDITABLE_SEPARATOR)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Editor command line from `$VISUAL`, then `$EDITOR`, then `sensible-editor`.
pub fn editor_command(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .find(|parts| !parts.is_empty())
        .unwrap_or_else(|| vec![FALLBACK_EDITOR.to_string()])
}

async fn open_in_editor(content: &str) -> SummarizerResult<String> {
    let file = tempfile::Builder::new()
        .prefix("jira-update-")
        .suffix(".md")
        .tempfile()
        .context("failed to create the summary file")?;
    let path = file.path().to_path_buf();

    let mut writer = tokio::fs::File::create(&path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    writer
        .write_all(content.as_bytes())
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer.flush().await?;
    drop(writer);

    let command = editor_command(|name| std::env::var(name).ok());
    debug!("opening {} with {:?}", path.display(), command);

    let status = tokio::process::Command::new(&command[0])
        .args(&command[1..])
        .arg(&path)
        .status()
        .await
        .map_err(|e| summarizer_error!(EditorError, "failed to start {}: {}", command[0], e))?;

    if !status.success() {
        return Err(summarizer_error!(EditorError, "{} exited with {}", command[0], status));
    }

    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read back {}", path.display()))
}

/// Ask whether an empty post should be skipped. Returns true to edit again.
pub fn should_reedit(input: &mut impl BufRead, output: &mut impl Write) -> bool {
    loop {
        if let Err(e) = write!(output, "Empty post detected, do you really want to skip posting? [Y/n]: ")
            .and_then(|_| output.flush())
        {
            error!("failed to write prompt: {}", e);
            return false;
        }

        let mut response = String::new();
        match input.read_line(&mut response) {
            Ok(0) => return false,
            Ok(_) => {}
            Err(e) => {
                error!("failed to read input: {}", e);
                return true;
            }
        }

        match response.trim().to_lowercase().as_str() {
            "n" | "no" => return true,
            "y" | "yes" | "" => return false,
            _ => continue,
        }
    }
}
