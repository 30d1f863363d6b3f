use diligence_chat_core::{
    AnalysisRecord, Block, ControllerBuilder, ConversationController,
    ConversationState, EmailHarvester, EmailList, IdentityResolver,
    MailDraft, NameLimits, ResolvedIdentity, TextBlockFormatter, compose,
};
use diligence_chat_interview::InterviewService;
use tokio::sync::watch;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    controller_builder: ControllerBuilder,
    resolver: IdentityResolver,
}

impl SessionBuilder {
    /// Creates a session builder with a specified interview service.
    pub fn with_interview_service<S: InterviewService + 'static>(
        service: S,
    ) -> Self {
        Self {
            controller_builder: ControllerBuilder::with_interview_service(
                service,
            ),
            resolver: IdentityResolver::new(),
        }
    }

    /// Sets the limits product name candidates must stay within.
    #[inline]
    pub fn with_name_limits(mut self, limits: NameLimits) -> Self {
        self.resolver = IdentityResolver::with_limits(limits);
        self
    }

    /// Attaches a callback to be invoked when the conversation is idle.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session about `record` and starts the conversation.
    ///
    /// Must be called within a tokio runtime.
    pub fn build(self, record: AnalysisRecord) -> Session {
        let harvester = EmailHarvester::new();
        let derived = Derived::new(&record, &self.resolver, &harvester);
        let controller = self.controller_builder.build(record.clone());

        Session {
            record,
            derived,
            resolver: self.resolver,
            harvester,
            formatter: TextBlockFormatter::new(),
            controller,
        }
    }
}

struct Derived {
    identity: ResolvedIdentity,
    emails: EmailList,
    intro_mail: MailDraft,
}

impl Derived {
    fn new(
        record: &AnalysisRecord,
        resolver: &IdentityResolver,
        harvester: &EmailHarvester,
    ) -> Self {
        let identity = resolver.resolve(record);
        let emails = harvester.harvest_record(record);
        let intro_mail = compose(&identity, &emails);
        debug!(
            "resolved {:?} with {} contact address(es)",
            identity.combined_label,
            emails.len()
        );
        Self {
            identity,
            emails,
            intro_mail,
        }
    }
}

/// A chat session, like a window that shows what is known about a company
/// next to a conversation about it.
///
/// The session holds the analysis record, everything derived from it, and
/// the conversation controller. It is basically a wrapper around
/// [`ConversationController`].
pub struct Session {
    record: AnalysisRecord,
    derived: Derived,
    resolver: IdentityResolver,
    harvester: EmailHarvester,
    formatter: TextBlockFormatter,
    controller: ConversationController,
}

impl Session {
    /// The analysis record the session is about.
    #[inline]
    pub fn record(&self) -> &AnalysisRecord {
        &self.record
    }

    /// Names resolved from the record.
    #[inline]
    pub fn identity(&self) -> &ResolvedIdentity {
        &self.derived.identity
    }

    /// Contact addresses found in the record.
    #[inline]
    pub fn emails(&self) -> &EmailList {
        &self.derived.emails
    }

    /// A prefilled intro call request.
    #[inline]
    pub fn intro_mail(&self) -> &MailDraft {
        &self.derived.intro_mail
    }

    /// Sends a message to the session.
    #[inline]
    pub fn send_message(&self, message: &str) {
        self.controller.send(message);
    }

    /// Returns a receiver that observes every conversation change.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.controller.subscribe()
    }

    /// Returns the conversation once all prior commands have been handled.
    #[inline]
    pub async fn snapshot(&self) -> Option<ConversationState> {
        self.controller.snapshot().await
    }

    /// Splits a reply into displayable blocks.
    #[inline]
    pub fn format_reply(&self, text: &str) -> Vec<Block> {
        self.formatter.format(text)
    }

    /// Switches the session to another record.
    ///
    /// If `record` differs from the current one, derived values are
    /// recomputed and the conversation restarts from scratch. Returns
    /// whether that happened.
    pub fn replace_record(&mut self, record: AnalysisRecord) -> bool {
        if record == self.record {
            return false;
        }
        self.derived = Derived::new(&record, &self.resolver, &self.harvester);
        self.controller.start(record.clone());
        self.record = record;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use diligence_chat_core::{Message, Stage};
    use diligence_chat_test_service::{PresetReply, TestInterviewService};
    use serde_json::json;
    use tokio::time::timeout;

    use super::*;

    fn acme() -> AnalysisRecord {
        AnalysisRecord::from_value(json!({
            "metadata": {
                "company_name": "Acme",
                "product_name": "RoboArm",
                "contact_email": "Founders@Acme.io"
            }
        }))
    }

    async fn wait_idle(session: &Session) -> ConversationState {
        let mut rx = session.subscribe();
        let state = timeout(
            Duration::from_millis(500),
            rx.wait_for(|s| s.stage() == Stage::Idle),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        state
    }

    #[tokio::test]
    async fn test_derived_values() {
        let mut service = TestInterviewService::default();
        service.add_reply_step(PresetReply::message("Hi."));

        let session = SessionBuilder::with_interview_service(service)
            .build(acme());
        assert_eq!(session.identity().combined_label, "Acme (Product: RoboArm)");
        assert_eq!(session.emails().as_slice(), ["Founders@Acme.io"]);
        assert_eq!(
            session.intro_mail().recipients.as_deref(),
            Some("Founders@Acme.io")
        );

        let state = wait_idle(&session).await;
        assert_eq!(state.history(), [Message::model("Hi.")]);
    }

    #[tokio::test]
    async fn test_replace_record() {
        let mut service = TestInterviewService::default();
        service.add_reply_step(PresetReply::message("Hi."));
        service.add_user_input_step();
        service.add_reply_step(PresetReply::Hang);

        let mut session =
            SessionBuilder::with_interview_service(service.clone())
                .build(acme());
        wait_idle(&session).await;
        session.send_message("Tell me more");
        let state = session.snapshot().await.unwrap();
        assert_eq!(state.history().len(), 2);

        assert!(!session.replace_record(acme()));
        assert_eq!(session.snapshot().await.unwrap().history().len(), 2);

        let globex = AnalysisRecord::from_value(json!({
            "metadata": { "company_name": "Globex" }
        }));
        assert!(session.replace_record(globex.clone()));
        assert_eq!(session.record(), &globex);
        assert_eq!(session.identity().combined_label, "Globex");
        assert!(session.emails().is_empty());
        assert_eq!(session.intro_mail().recipients, None);

        let state = wait_idle(&session).await;
        assert_eq!(state.history(), [Message::model("Hi.")]);
    }

    #[tokio::test]
    async fn test_name_limits() {
        let session = SessionBuilder::with_interview_service(
            TestInterviewService::default(),
        )
        .with_name_limits(NameLimits {
            max_chars: 5,
            max_words: 1,
        })
        .build(acme());
        assert_eq!(session.identity().product_name, None);
        assert_eq!(session.identity().combined_label, "Acme");
    }
}
