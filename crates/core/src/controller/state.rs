use std::fmt::{self, Debug};

use diligence_chat_interview::{InterviewRequest, Message};
use tokio::select;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::conversation::{ConversationState, Stage};
use crate::record::AnalysisRecord;
use crate::service_client::{SendRequestResult, ServiceClient};

pub struct Fallbacks {
    pub opening: String,
    pub reply: String,
}

#[derive(Debug)]
pub enum Command {
    Start(AnalysisRecord),
    Send(String),
    SetPendingInput(String),
    SubmitPendingInput,
    Snapshot(oneshot::Sender<ConversationState>),
    RequestFinished {
        epoch: u64,
        result: SendRequestResult,
    },
}

pub struct ControllerState {
    client: ServiceClient,
    fallbacks: Fallbacks,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    state_tx: watch::Sender<ConversationState>,
    cmd_tx: mpsc::UnboundedSender<Command>,
    analysis: String,
    // Bumped on every start, so that replies to an abandoned
    // conversation can be told apart.
    epoch: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl Debug for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerState")
            .field("epoch", &self.epoch)
            .field("in_flight", &self.in_flight.is_some())
            .finish_non_exhaustive()
    }
}

impl ControllerState {
    pub fn new(
        client: ServiceClient,
        fallbacks: Fallbacks,
        on_idle: Option<Box<dyn Fn() + Send + Sync>>,
        state_tx: watch::Sender<ConversationState>,
        cmd_tx: mpsc::UnboundedSender<Command>,
    ) -> Self {
        Self {
            client,
            fallbacks,
            on_idle,
            state_tx,
            cmd_tx,
            analysis: String::new(),
            epoch: 0,
            in_flight: None,
        }
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Start(record) => self.start(record),
            Command::Send(text) => self.send(text),
            Command::SetPendingInput(text) => {
                self.state_tx.send_modify(|state| state.pending_input = text);
            }
            Command::SubmitPendingInput => {
                let text = self.state_tx.borrow().pending_input.clone();
                self.send(text);
            }
            Command::Snapshot(tx) => {
                tx.send(self.state_tx.borrow().clone()).ok();
            }
            Command::RequestFinished { epoch, result } => {
                self.finish_request(epoch, result);
            }
        }
    }

    fn start(&mut self, record: AnalysisRecord) {
        self.abort_in_flight();
        self.epoch += 1;
        self.analysis = record.serialize();
        debug!("starting conversation #{}", self.epoch);

        self.state_tx.send_replace(ConversationState {
            history: vec![],
            pending_input: String::new(),
            stage: Stage::Initializing,
        });
        self.issue_request(vec![]);
    }

    fn send(&mut self, text: String) {
        let stage = self.state_tx.borrow().stage;
        if stage != Stage::Idle {
            debug!("ignoring user input while {stage:?}");
            return;
        }
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let mut history = vec![];
        self.state_tx.send_modify(|state| {
            state.history.push(Message::user(text));
            state.pending_input.clear();
            state.stage = Stage::Awaiting;
            history = state.history.clone();
        });
        self.issue_request(history);
    }

    fn issue_request(&mut self, history: Vec<Message>) {
        let request = InterviewRequest {
            analysis: self.analysis.clone(),
            history,
        };
        let epoch = self.epoch;
        let reply_fut = self.client.send_request(request);
        let cmd_tx = self.cmd_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = reply_fut.await;
            cmd_tx.send(Command::RequestFinished { epoch, result }).ok();
        }));
    }

    fn finish_request(&mut self, epoch: u64, result: SendRequestResult) {
        if epoch != self.epoch {
            debug!("discarding a reply from conversation #{epoch}");
            return;
        }
        self.in_flight = None;

        let stage = self.state_tx.borrow().stage;
        let content = match result {
            Ok(reply) => reply.message,
            Err(err) => {
                warn!("request failed while {stage:?}, using fallback: {err}");
                match stage {
                    Stage::Initializing => self.fallbacks.opening.clone(),
                    Stage::Awaiting | Stage::Idle => {
                        self.fallbacks.reply.clone()
                    }
                }
            }
        };

        self.state_tx.send_modify(|state| {
            state.history.push(Message::model(content));
            state.stage = Stage::Idle;
        });
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            trace!("aborting the request in flight");
            task.abort();
        }
    }
}

pub async fn run_controller(
    mut state: ControllerState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    loop {
        let cmd = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                cmd
            }
        };
        trace!("received command: {cmd:?}");
        state.handle(cmd);
    }
    state.abort_in_flight();
    debug!("will terminate");
}
