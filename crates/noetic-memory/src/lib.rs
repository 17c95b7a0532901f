//! Thought records, Working Memory and the Interest Pattern Table (spec
//! sections 3, 4.2, 4.3). Grounded in `beagle-consciousness::global_workspace`'s
//! `VecDeque`-backed `memory_stream` with a capacity cap, and in
//! `beagle-memory::models`'s plain-data node shape.

mod interest;
mod thought;
mod topic;
mod working_memory;

pub use interest::InterestTable;
pub use thought::{Thought, ThoughtOrigin, ThoughtSource, ThoughtType};
pub use topic::{EmptyTopicExtractor, TopicExtractor, WordTopicExtractor};
pub use working_memory::{WorkingMemory, WorkingMemoryError, WorkingMemorySnapshot};
