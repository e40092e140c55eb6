/*!
Identifier generation for the secure session subsystem.

Identity generation is a capability injected at construction rather than a
process-wide helper, so identities stay traceable to whichever generator
produced them.
*/

use uuid::Uuid;

/// Capability for generating session-scoped unique identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh unique identifier
    fn new_id(&self) -> String;
}

/// Default identifier generator backed by random UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
