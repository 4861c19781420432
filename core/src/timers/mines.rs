use hashbrown::HashMap;

/// Seconds before cycle completion at which the refresh alert fires, so
/// it lands slightly before the mine actually resets.
pub const REFRESH_LEAD_SECS: u64 = 3;

/// One bounded stopwatch per enrolled mine, advanced once per tick and
/// wrapping at the mine's cooldown.
#[derive(Debug, Default)]
pub struct MineBoard {
    elapsed: HashMap<String, u64>,
}

impl MineBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance every enrolled mine by one second. Returns the mines
    /// whose refresh alert is due this tick, exactly one alert per
    /// cycle per mine.
    pub fn advance(
        &mut self,
        enrolled: &[String],
        cooldowns: &HashMap<String, u64>,
    ) -> Vec<String> {
        let mut refreshed = Vec::new();
        for name in enrolled {
            let Some(cooldown) = cooldowns.get(name).copied() else {
                continue;
            };
            if cooldown == 0 {
                continue;
            }
            let elapsed = self.elapsed.entry(name.clone()).or_insert(0);
            *elapsed += 1;
            if cooldown > REFRESH_LEAD_SECS && *elapsed == cooldown - REFRESH_LEAD_SECS {
                refreshed.push(name.clone());
            }
            if *elapsed >= cooldown {
                *elapsed = 0;
            }
        }
        refreshed
    }

    pub fn elapsed(&self, name: &str) -> u64 {
        self.elapsed.get(name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(name: &str, cooldown: u64) -> (MineBoard, Vec<String>, HashMap<String, u64>) {
        let enrolled = vec![name.to_string()];
        let mut cooldowns = HashMap::new();
        cooldowns.insert(name.to_string(), cooldown);
        (MineBoard::new(), enrolled, cooldowns)
    }

    #[test]
    fn test_fires_once_per_cycle_with_lead() {
        let (mut board, enrolled, cooldowns) = board_with("Железная жила", 10);

        let mut fired_at = Vec::new();
        for _ in 0..10 {
            if !board.advance(&enrolled, &cooldowns).is_empty() {
                fired_at.push(board.elapsed("Железная жила"));
            }
        }

        // one alert, at elapsed 7 of 10, wrapped back to 0 at 10
        assert_eq!(fired_at, vec![7]);
        assert_eq!(board.elapsed("Железная жила"), 0);
    }

    #[test]
    fn test_cycle_repeats_identically() {
        let (mut board, enrolled, cooldowns) = board_with("Железная жила", 10);

        let mut alerts = 0;
        for _ in 0..30 {
            alerts += board.advance(&enrolled, &cooldowns).len();
        }
        assert_eq!(alerts, 3);
    }

    #[test]
    fn test_unenrolled_mine_never_advances() {
        let (mut board, _, cooldowns) = board_with("Железная жила", 10);

        for _ in 0..20 {
            assert!(board.advance(&[], &cooldowns).is_empty());
        }
        assert_eq!(board.elapsed("Железная жила"), 0);
    }

    #[test]
    fn test_mine_without_cooldown_is_skipped() {
        let mut board = MineBoard::new();
        let enrolled = vec!["Неизвестная жила".to_string()];
        let cooldowns = HashMap::new();

        assert!(board.advance(&enrolled, &cooldowns).is_empty());
        assert_eq!(board.elapsed("Неизвестная жила"), 0);
    }
}
