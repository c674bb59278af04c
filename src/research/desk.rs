//! Research desk: the research chat state and its single operation
//!
//! `ResearchDesk` owns the transcript, the citation source list, the lazily
//! created chat session, and the busy flag. Observers subscribe to a
//! stream of [`ResearchEvent`]s instead of polling the state.

use std::sync::Arc;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::config::ResearchConfig;
use crate::providers::{ChatSession, Provider};
use crate::research::sources::{sources_from_grounding, GroundingSource, SourceList};
use crate::research::transcript::{ChatMessage, Transcript};

/// State change notifications emitted by a [`ResearchDesk`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchEvent {
    /// The busy flag changed to the given value
    BusyChanged(bool),
    /// A transcript entry was appended at the given index
    MessageAppended(usize),
    /// The source list changed; carries its new length
    SourcesUpdated(usize),
}

/// Result of a single `submit_query` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The query was blank after trimming; nothing changed
    Ignored,
    /// A turn was already in flight; nothing changed
    Busy,
    /// The assistant replied; its entry was appended
    Answered,
    /// The turn failed; the fallback entry was appended
    Fallback,
}

/// Owner of the research chat state
pub struct ResearchDesk {
    provider: Arc<dyn Provider>,
    config: ResearchConfig,
    transcript: Transcript,
    sources: SourceList,
    session: Option<ChatSession>,
    busy: bool,
    subscribers: Vec<UnboundedSender<ResearchEvent>>,
}

impl ResearchDesk {
    /// Create an empty desk
    ///
    /// No session is opened until the first query is submitted.
    pub fn new(provider: Arc<dyn Provider>, config: ResearchConfig) -> Self {
        let sources = SourceList::new(config.max_sources);
        Self {
            provider,
            config,
            transcript: Transcript::new(),
            sources,
            session: None,
            busy: false,
            subscribers: Vec::new(),
        }
    }

    /// Submit one research query
    ///
    /// The user entry is appended before the provider is contacted. On
    /// success the citation sources are merged first and the assistant
    /// reply is appended second. Any failure is logged and replaced by the
    /// configured fallback message; it is never returned to the caller.
    pub async fn submit_query(&mut self, text: &str) -> SubmitOutcome {
        let query = text.trim();
        if query.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.busy {
            tracing::debug!("Rejecting query while a turn is outstanding");
            return SubmitOutcome::Busy;
        }

        let Self {
            provider,
            config,
            transcript,
            sources,
            session,
            busy,
            subscribers,
        } = self;
        let mut turn = TurnGuard::begin(busy, transcript, subscribers, &config.fallback_message);
        tracing::info!("Submitting research query ({} chars)", query.chars().count());

        turn.append(ChatMessage::user(query));

        let session = session.get_or_insert_with(|| {
            tracing::debug!("Opening chat session");
            ChatSession::new(
                Arc::clone(provider),
                config.system_instruction.clone(),
                config.search_enabled,
            )
        });

        let reply = session.send_message(query).await;
        match reply {
            Ok(response) => {
                if let Some(grounding) = response.grounding.as_ref() {
                    let batch = sources_from_grounding(grounding);
                    if !batch.is_empty() {
                        sources.merge_batch(batch);
                        turn.notify(ResearchEvent::SourcesUpdated(sources.len()));
                    }
                }

                turn.append(ChatMessage::assistant(response.text, response.grounding));
                turn.settle();
                SubmitOutcome::Answered
            }
            Err(e) => {
                tracing::error!("Research query failed: {:#}", e);
                turn.append_fallback();
                turn.settle();
                SubmitOutcome::Fallback
            }
        }
    }

    /// Subscribe to state change events
    pub fn subscribe(&mut self) -> UnboundedReceiver<ResearchEvent> {
        let (tx, rx) = unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn sources(&self) -> &[GroundingSource] {
        self.sources.as_slice()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// True once any query has been accepted
    pub fn has_searched(&self) -> bool {
        !self.transcript.is_empty()
    }

    /// True once the chat session has been opened
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Configured starter queries
    pub fn suggestions(&self) -> &[String] {
        &self.config.suggestions
    }

    /// Starter query by 1-based position
    pub fn suggestion(&self, n: usize) -> Option<&str> {
        n.checked_sub(1)
            .and_then(|i| self.config.suggestions.get(i))
            .map(String::as_str)
    }

}

fn broadcast(subscribers: &mut Vec<UnboundedSender<ResearchEvent>>, event: ResearchEvent) {
    subscribers.retain(|tx| tx.send(event).is_ok());
}

/// One in-flight turn
///
/// Holds the busy flag for as long as the turn lives. Dropping an
/// unsettled turn (the `submit_query` future was cancelled) appends the
/// fallback reply, and every drop clears the busy flag.
struct TurnGuard<'a> {
    busy: &'a mut bool,
    transcript: &'a mut Transcript,
    subscribers: &'a mut Vec<UnboundedSender<ResearchEvent>>,
    fallback: &'a str,
    settled: bool,
}

impl<'a> TurnGuard<'a> {
    fn begin(
        busy: &'a mut bool,
        transcript: &'a mut Transcript,
        subscribers: &'a mut Vec<UnboundedSender<ResearchEvent>>,
        fallback: &'a str,
    ) -> Self {
        *busy = true;
        broadcast(subscribers, ResearchEvent::BusyChanged(true));
        Self {
            busy,
            transcript,
            subscribers,
            fallback,
            settled: false,
        }
    }

    fn notify(&mut self, event: ResearchEvent) {
        broadcast(self.subscribers, event);
    }

    fn append(&mut self, message: ChatMessage) -> usize {
        let index = self.transcript.append(message);
        self.notify(ResearchEvent::MessageAppended(index));
        index
    }

    fn append_fallback(&mut self) -> usize {
        let fallback = self.fallback.to_string();
        self.append(ChatMessage::assistant(fallback, None))
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Research turn cancelled before a reply arrived");
            self.append_fallback();
        }
        *self.busy = false;
        self.notify(ResearchEvent::BusyChanged(false));
    }
}
