use crate::types::HealthRes;

/// Simple health service shared by every HTTP front end.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is alive.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Symptom analysis service is alive".into(),
        }
    }
}
