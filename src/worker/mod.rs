mod entry;
mod factory;
mod process;
pub mod protocol;
mod template;

pub use entry::review_aspect;
pub use factory::{WorkerCommand, WorkerFactory};
pub use process::{run_worker_process, ProcessOutput};
pub use protocol::{parse_record, WorkerRecord};
pub use template::PromptTemplate;
