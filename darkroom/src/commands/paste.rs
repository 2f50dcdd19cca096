use std::io::Read;

use tokio::sync::mpsc::Sender;

/// CLI arguments for the paste subcommand.
#[derive(Debug, clap::Args)]
pub struct PasteSubCommand {
    /// Read payloads from a file instead of standard input
    #[arg(short = 'f', long = "file")]
    pub input_file: Option<std::path::PathBuf>,
}

impl PasteSubCommand {
    /// Feed pasted payload text to the background processor, one payload
    /// per blank-line separated block.
    ///
    /// Input is read to EOF before forwarding, which matches how payloads
    /// arrive here: dumped in one go out of a scanner app's export.
    pub async fn handle(&self, transfer_channel: Sender<String>) -> std::io::Result<()> {
        let input = match &self.input_file {
            Some(path) => {
                log::info!("Reading payloads from {}", path.to_string_lossy());
                std::fs::read_to_string(path)?
            }
            None => {
                log::info!("Reading payloads from standard input until EOF...");
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        for payload in split_payloads(&input) {
            if let Err(err) = transfer_channel.send(payload).await {
                log::error!("Payload processor is gone: {}", err);
                break;
            }
        }

        Ok(())
    }
}

/// Split pasted text into payloads on blank lines. A chunk frame or a bare
/// base64 blob may span several lines, so single newlines stay inside
/// their payload.
fn split_payloads(input: &str) -> Vec<String> {
    input
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_payloads;

    #[test]
    fn splits_on_blank_lines() {
        let payloads = split_payloads("first\n\nsecond\n\nthird");

        assert_eq!(payloads, vec!["first", "second", "third"]);
    }

    #[test]
    fn keeps_single_newlines_inside_a_payload() {
        let payloads = split_payloads("QUJD\nREVG\n\nSElK");

        assert_eq!(payloads, vec!["QUJD\nREVG", "SElK"]);
    }

    #[test]
    fn tolerates_crlf_and_extra_blank_lines() {
        let payloads = split_payloads("first\r\n\r\n\r\n\r\nsecond\r\n");

        assert_eq!(payloads, vec!["first", "second"]);
    }
}
