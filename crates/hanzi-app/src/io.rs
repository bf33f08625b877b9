use hanzi_core::language::LookupScope;
use hanzi_core::types::AppEvent;
use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

/// Where lookup requests come from
pub enum Input {
    /// One request per command-line argument
    Args(Vec<String>),
    /// One request per stdin line
    Stdin,
}

/// Turn input into lookup requests, then announce that input is closed
pub async fn read_requests(
    input: Input,
    scope: LookupScope,
    cancel: CancellationToken,
    tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut next_id = 0u64;
    let mut request = |text: String| {
        next_id += 1;
        AppEvent::Lookup {
            id: next_id,
            text,
            scope,
        }
    };

    match input {
        Input::Args(texts) => {
            for text in texts {
                tx.send(request(text)).await?;
            }
        }
        Input::Stdin => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    line = lines.next_line() => {
                        match line? {
                            Some(line) if line.trim().is_empty() => continue,
                            Some(line) => tx.send(request(line)).await?,
                            None => break,
                        }
                    }
                    _ = cancel.cancelled() => {
                        tracing::info!("Input reader stopping");
                        break;
                    }
                }
            }
        }
    }

    tx.send(AppEvent::InputClosed).await?;
    Ok(())
}
