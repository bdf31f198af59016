use crate::history::format_transcript;
use crate::session::{ ChatSession, SubmitOutcome };
use futures::future::join_all;
use log::{ debug, error, info };
use std::error::Error;
use std::sync::Arc;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, BufReader };
use tokio::task::JoinHandle;

#[derive(Debug, PartialEq, Eq)]
pub enum InputLine<'a> {
    Quit,
    History,
    Chat(&'a str),
}

pub fn parse_line(line: &str) -> InputLine<'_> {
    match line.trim() {
        "/quit" | "/exit" => InputLine::Quit,
        "/history" => InputLine::History,
        _ => InputLine::Chat(line),
    }
}

pub async fn run_terminal(session: Arc<ChatSession>) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("Type a message and press Enter. /history shows the conversation, /quit exits.");
    run_loop(session, BufReader::new(tokio::io::stdin())).await
}

/// Each chat line is dispatched without waiting for the previous reply, so a
/// new message may be sent while another is still in flight. On quit or end
/// of input the loop waits for every outstanding exchange.
pub async fn run_loop<R>(
    session: Arc<ChatSession>,
    input: R
) -> Result<(), Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin
{
    let mut lines = input.lines();
    let mut in_flight: Vec<JoinHandle<SubmitOutcome>> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        reap_finished(&mut in_flight).await;

        match parse_line(&line) {
            InputLine::Quit => {
                break;
            }
            InputLine::History => {
                print!("{}", format_transcript(&session.history()));
            }
            InputLine::Chat(text) => {
                if let Some(handle) = session.dispatch(text) {
                    in_flight.push(handle);
                }
            }
        }
    }

    if !in_flight.is_empty() {
        debug!("Waiting for {} in-flight exchange(s)", in_flight.len());
    }
    for result in join_all(in_flight).await {
        if let Err(e) = result {
            error!("Exchange task failed: {}", e);
        }
    }

    Ok(())
}

/// Removes completed exchange tasks, logging any that panicked or were
/// cancelled. Returns how many failed.
pub async fn reap_finished(in_flight: &mut Vec<JoinHandle<SubmitOutcome>>) -> usize {
    let (finished, pending): (Vec<_>, Vec<_>) = in_flight
        .drain(..)
        .partition(|handle| handle.is_finished());
    *in_flight = pending;

    let mut failed = 0;
    for handle in finished {
        if let Err(e) = handle.await {
            error!("Exchange task failed: {}", e);
            failed += 1;
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ChatBackend;
    use crate::error::ExchangeFailure;
    use crate::models::chat::{ ChatRequest, ChatResponse, Message };
    use crate::render::BufferRenderer;
    use async_trait::async_trait;

    struct EchoBackend;

    #[async_trait]
    impl ChatBackend for EchoBackend {
        async fn exchange(&self, request: &ChatRequest) -> Result<ChatResponse, ExchangeFailure> {
            Ok(ChatResponse { response: format!("echo: {}", request.message) })
        }
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_line("/quit"), InputLine::Quit);
        assert_eq!(parse_line("  /exit "), InputLine::Quit);
        assert_eq!(parse_line("/history"), InputLine::History);
        assert_eq!(parse_line("hello"), InputLine::Chat("hello"));
    }

    #[tokio::test]
    async fn loop_waits_for_outstanding_exchanges() {
        let renderer = Arc::new(BufferRenderer::new());
        let session = Arc::new(ChatSession::initialize(Arc::new(EchoBackend), renderer.clone(), "hi"));

        let input: &[u8] = b"one\n\n   \ntwo\n/history\n";
        run_loop(session.clone(), input).await.unwrap();

        let history = session.history();
        assert_eq!(history.len(), 5);
        assert!(history.contains(&Message::user("one")));
        assert!(history.contains(&Message::assistant("echo: two")));
        assert_eq!(renderer.input_clears(), 2);
    }

    #[tokio::test]
    async fn finished_tasks_are_reaped_and_panics_counted() {
        async fn crash() -> SubmitOutcome {
            panic!("exchange task crashed")
        }

        let crashed = tokio::spawn(crash());
        let ok: JoinHandle<SubmitOutcome> = tokio::spawn(async { SubmitOutcome::Ignored });
        let (_release, gate) = tokio::sync::oneshot::channel::<()>();
        let pending: JoinHandle<SubmitOutcome> = tokio::spawn(async move {
            let _ = gate.await;
            SubmitOutcome::Ignored
        });
        while !(crashed.is_finished() && ok.is_finished()) {
            tokio::task::yield_now().await;
        }

        let mut in_flight = vec![crashed, ok, pending];
        assert_eq!(reap_finished(&mut in_flight).await, 1);
        assert_eq!(in_flight.len(), 1);
        assert!(!in_flight[0].is_finished());
    }

    #[tokio::test]
    async fn quit_stops_reading() {
        let renderer = Arc::new(BufferRenderer::new());
        let session = Arc::new(ChatSession::initialize(Arc::new(EchoBackend), renderer, "hi"));

        let input: &[u8] = b"one\n/quit\ntwo\n";
        run_loop(session.clone(), input).await.unwrap();

        assert_eq!(
            session.history(),
            vec![Message::assistant("hi"), Message::user("one"), Message::assistant("echo: one")]
        );
    }
}
