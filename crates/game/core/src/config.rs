/// World-level switches and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Dummy worlds (editor previews, thumbnails) never start interval timers.
    pub dummy: bool,
    /// Cause reported when a projectile kills the player, `{}` is replaced
    /// with the projectile's type.
    pub projectile_cause: String,
}

impl WorldConfig {
    pub const DEFAULT_PROJECTILE_CAUSE: &'static str = "a {}";

    pub fn new() -> Self {
        Self {
            dummy: false,
            projectile_cause: Self::DEFAULT_PROJECTILE_CAUSE.to_owned(),
        }
    }

    pub fn dummy() -> Self {
        Self {
            dummy: true,
            ..Self::new()
        }
    }

    /// Cause of death for a player hit by a projectile of `object_type`.
    pub fn projectile_cause_for(&self, object_type: &str) -> String {
        self.projectile_cause.replace("{}", object_type)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projectile_cause_names_the_type() {
        assert_eq!(WorldConfig::new().projectile_cause_for("boulder"), "a boulder");
    }

    #[test]
    fn dummy_preset_only_flips_dummy() {
        let config = WorldConfig::dummy();
        assert!(config.dummy);
        assert_eq!(config.projectile_cause, WorldConfig::DEFAULT_PROJECTILE_CAUSE);
    }
}
