//! Binary whole-valley snapshots.
//!
//! Layout: the 4-byte magic `VLLY` followed by a bincode-encoded
//! [`Snapshot`]. Anything that fails to decode or whose grid breaks the
//! structural invariants is reported as [`Error::PersistenceCorrupt`].

use crate::grid::Grid;
use crate::simulation::Valley;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use valley_core::{Error, Result, ValleyConfig};

const MAGIC: &[u8; 4] = b"VLLY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub tick: u64,
    pub config: ValleyConfig,
    pub grid: Grid,
}

impl Snapshot {
    pub const VERSION: u32 = 1;

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = MAGIC.to_vec();
        bincode::serialize_into(&mut bytes, self)?;
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let body = bytes
            .strip_prefix(MAGIC.as_slice())
            .ok_or_else(|| Error::PersistenceCorrupt("missing snapshot header".to_string()))?;
        let snapshot: Snapshot = bincode::deserialize(body)
            .map_err(|err| Error::PersistenceCorrupt(format!("undecodable snapshot: {}", err)))?;

        if snapshot.version != Self::VERSION {
            return Err(Error::PersistenceCorrupt(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        snapshot
            .config
            .validate()
            .map_err(|err| Error::PersistenceCorrupt(err.to_string()))?;
        if snapshot.config.size != snapshot.grid.size() {
            return Err(Error::PersistenceCorrupt(format!(
                "configured size {} does not match grid size {}",
                snapshot.config.size,
                snapshot.grid.size()
            )));
        }
        snapshot.grid.validate()?;
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()?)?;
        info!(path = %path.display(), tick = self.tick, "Snapshot saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let snapshot = Self::from_bytes(&std::fs::read(path)?)?;
        info!(
            path = %path.display(),
            tick = snapshot.tick,
            saved_at = %snapshot.saved_at,
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

impl Valley {
    /// Capture the full state of the valley
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: Snapshot::VERSION,
            saved_at: Utc::now(),
            tick: self.tick_count(),
            config: self.config().clone(),
            grid: self.grid().clone(),
        }
    }

    pub fn restore(snapshot: Snapshot) -> Result<Valley> {
        snapshot.grid.validate()?;
        Valley::from_parts(snapshot.config, snapshot.grid, snapshot.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{Fox, Grass, Sheep};
    use crate::unit::{Body, Unit};
    use valley_core::{Position, Species};

    fn scene() -> Valley {
        let mut valley = Valley::with_default_units(ValleyConfig {
            seed: 5,
            ..Default::default()
        })
        .unwrap();
        let mut grass = Grass::new();
        grass.be_eaten();
        grass.grow();
        valley.insert(Position::new(24, 24), Body::Grass(grass)).unwrap();
        let mut sheep = Sheep::new();
        sheep.animal.set_energy(77);
        valley.insert(Position::new(20, 1), Body::Sheep(sheep)).unwrap();
        valley.insert(Position::new(18, 3), Body::Fox(Fox::new())).unwrap();
        valley.run(7, 0);
        valley
    }

    fn units(valley: &Valley) -> Vec<Unit> {
        valley.grid().units().cloned().collect()
    }

    #[test]
    fn test_round_trip_is_exact() {
        let mut valley = scene();
        let bytes = valley.snapshot().to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"VLLY");

        let mut restored = Valley::restore(Snapshot::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(units(&restored), units(&valley));
        assert_eq!(restored.tick_count(), 7);
        assert_eq!(restored.config(), valley.config());

        // The id allocator survives as well
        let grid = valley.grid();
        let free = (0..grid.cell_count())
            .map(|index| grid.index_to_pos(index))
            .find(|pos| grid.is_empty(*pos))
            .unwrap();
        let a = valley.spawn(Species::Hay, free).unwrap();
        let b = restored.spawn(Species::Hay, free).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_restored_runs_are_deterministic() {
        let snapshot = scene().snapshot();
        let run = |snapshot: Snapshot| {
            let mut valley = Valley::restore(snapshot).unwrap();
            valley.run(10, 0);
            units(&valley)
        };

        assert_eq!(run(snapshot.clone()), run(snapshot));
    }

    #[test]
    fn test_garbage_is_rejected() {
        for bytes in [&b""[..], &b"VLL"[..], &b"NOPE1234"[..], &b"VLLY\x01\x02\x03"[..]] {
            let err = Snapshot::from_bytes(bytes).unwrap_err();
            assert!(matches!(err, Error::PersistenceCorrupt(_)), "{err}");
        }
    }

    #[test]
    fn test_version_and_size_mismatch_rejected() {
        let mut snapshot = scene().snapshot();
        snapshot.version = 99;
        let err = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap_err();
        assert!(matches!(err, Error::PersistenceCorrupt(_)));

        let mut snapshot = scene().snapshot();
        snapshot.config.size = 10;
        let err = Snapshot::from_bytes(&snapshot.to_bytes().unwrap()).unwrap_err();
        assert!(matches!(err, Error::PersistenceCorrupt(_)));
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("valley-snapshot-{}.bin", std::process::id()));
        let valley = scene();

        valley.snapshot().save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(units(&Valley::restore(loaded).unwrap()), units(&valley));
    }
}
