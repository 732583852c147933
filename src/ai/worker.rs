//! Background worker that runs AI queries off the input thread.
//!
//! Requests go in over a channel; each one runs as its own task on a
//! single-threaded tokio runtime and its reply comes back on a second
//! channel. Replies arrive in completion order, not submission order.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use flume::{Receiver, Sender};

use super::{AiError, MathSolver};

/// A question for the assistant.
#[derive(Debug)]
pub struct AiRequest {
    /// Transcript id of the question this request answers.
    pub question_id: u64,
    pub problem: String,
}

/// The assistant's answer, or the reason there is none.
#[derive(Debug)]
pub struct AiReply {
    pub question_id: u64,
    pub outcome: Result<String, AiError>,
}

pub struct AiWorker {
    requests: Sender<AiRequest>,
    replies: Receiver<AiReply>,
    _thread: JoinHandle<()>,
}

impl AiWorker {
    /// Start the worker thread.
    pub fn spawn(solver: Arc<dyn MathSolver>) -> std::io::Result<Self> {
        let (requests, request_rx) = flume::unbounded::<AiRequest>();
        let (reply_tx, replies) = flume::unbounded::<AiReply>();

        let thread = thread::Builder::new()
            .name("zcalc-ai".to_string())
            .spawn(move || run(solver, request_rx, reply_tx))?;

        Ok(Self {
            requests,
            replies,
            _thread: thread,
        })
    }

    /// Queue a question. Never blocks.
    pub fn submit(&self, request: AiRequest) -> Result<(), AiError> {
        self.requests.send(request).map_err(|_| AiError::WorkerGone)
    }

    /// Channel the answers arrive on.
    pub fn replies(&self) -> &Receiver<AiReply> {
        &self.replies
    }
}

fn run(solver: Arc<dyn MathSolver>, requests: Receiver<AiRequest>, replies: Sender<AiReply>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "failed to start AI runtime");
            return;
        }
    };

    runtime.block_on(async move {
        while let Ok(request) = requests.recv_async().await {
            let solver = Arc::clone(&solver);
            let replies = replies.clone();

            tokio::spawn(async move {
                let outcome = solver.solve(request.problem).await;
                if replies
                    .send(AiReply {
                        question_id: request.question_id,
                        outcome,
                    })
                    .is_err()
                {
                    tracing::debug!(question_id = request.question_id, "reply dropped, session closed");
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use std::time::Duration;

    /// Echoes the problem back, failing on "fail".
    struct EchoSolver;

    impl MathSolver for EchoSolver {
        fn solve(&self, problem: String) -> BoxFuture<'static, Result<String, AiError>> {
            async move {
                if problem == "fail" {
                    return Err(AiError::Request("boom".into()));
                }
                Ok(format!("answer: {}", problem))
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn test_solver_answers_directly() {
        let solver: Arc<dyn MathSolver> = Arc::new(EchoSolver);
        assert_eq!(solver.solve("3 * 3".into()).await.unwrap(), "answer: 3 * 3");
        assert!(matches!(
            solver.solve("fail".into()).await,
            Err(AiError::Request(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let worker = AiWorker::spawn(Arc::new(EchoSolver)).unwrap();
        worker
            .submit(AiRequest {
                question_id: 7,
                problem: "2 + 2".into(),
            })
            .unwrap();

        let reply = worker.replies().recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(reply.question_id, 7);
        assert_eq!(reply.outcome.unwrap(), "answer: 2 + 2");
    }

    #[test]
    fn test_failure_is_reported() {
        let worker = AiWorker::spawn(Arc::new(EchoSolver)).unwrap();
        worker
            .submit(AiRequest {
                question_id: 1,
                problem: "fail".into(),
            })
            .unwrap();

        let reply = worker.replies().recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(reply.outcome, Err(AiError::Request(_))));
    }
}
