use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mints `{prefix}-{unix millis}-{9 base-36 chars}` tokens.
///
/// Unique within one process with overwhelming probability; nothing guards
/// against clock rollback or collisions across machines.
pub struct SessionIdGenerator;

impl SessionIdGenerator {
    pub fn generate(prefix: &str) -> String {
        Self::generate_with(prefix, Utc::now().timestamp_millis(), &mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(prefix: &str, millis: i64, rng: &mut R) -> String {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        format!("{}-{}-{}", prefix, millis, suffix)
    }
}
