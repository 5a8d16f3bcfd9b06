use serde::{Deserialize, Serialize};

/// Lobby settings captured from the game and stored in a slot.
///
/// `map` and `impostors` are read for completeness but never stored or
/// written back; the game does not propagate them to other players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    #[serde(skip)]
    pub map: i32,
    pub player_speed: f32,
    pub crewmate_vision: f32,
    pub impostor_vision: f32,
    pub kill_cooldown: f32,
    pub common_tasks: i32,
    pub long_tasks: i32,
    pub short_tasks: i32,
    pub emergency_meeting: i32,
    pub emergency_cooldown: i32,
    #[serde(skip)]
    pub impostors: i32,
    pub kill_distance: i32,
    pub discussion_time: i32,
    pub voting_time: i32,
    pub confirm_eject: bool,
    pub visual_tasks: bool,
    pub anonymous_voting: bool,
    pub task_bar_updates: i32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            map: 0,
            player_speed: 1.0,
            crewmate_vision: 1.0,
            impostor_vision: 1.5,
            kill_cooldown: 45.0,
            common_tasks: 1,
            long_tasks: 1,
            short_tasks: 2,
            emergency_meeting: 1,
            emergency_cooldown: 15,
            impostors: 1,
            kill_distance: 1,
            discussion_time: 15,
            voting_time: 120,
            confirm_eject: true,
            visual_tasks: true,
            anonymous_voting: false,
            task_bar_updates: 0,
        }
    }
}

impl GameSettings {
    /// Copy every writable field onto `target`, keeping its map and
    /// impostor count.
    pub fn apply_to(&self, target: &mut GameSettings) {
        *target = GameSettings {
            map: target.map,
            impostors: target.impostors,
            ..self.clone()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_fields_are_not_serialized() {
        let settings = GameSettings {
            map: 2,
            impostors: 3,
            ..Default::default()
        };
        let v = serde_json::to_value(&settings).unwrap();
        assert!(v.get("map").is_none());
        assert!(v.get("impostors").is_none());
        assert_eq!(v["playerSpeed"], 1.0);
        assert_eq!(v["votingTime"], 120);
    }

    #[test]
    fn apply_keeps_uncontrollable_fields() {
        let mut live = GameSettings {
            map: 2,
            impostors: 3,
            ..Default::default()
        };
        let saved = GameSettings {
            map: 0,
            impostors: 1,
            kill_cooldown: 10.0,
            anonymous_voting: true,
            ..Default::default()
        };
        saved.apply_to(&mut live);
        assert_eq!(live.map, 2);
        assert_eq!(live.impostors, 3);
        assert_eq!(live.kill_cooldown, 10.0);
        assert!(live.anonymous_voting);
    }
}
