//! Map layout loader.
//!
//! A layout describes the terrain grid, the static background layer, the
//! player's start and the dynamic objects to spawn:
//!
//! ```ron
//! (
//!     dimensions: (10, 8),
//!     player: (1, 1),
//!     terrain: [(3, 0, Wall), (4, 4, Water)],
//!     background: [(5, 5, "redKey"), (6, 1, "mine")],
//!     crossings: [("boulder", Water)],
//!     spawns: [("boulder", 8, 2)],
//! )
//! ```

use std::path::Path;

use maze_core::{
    GridMap, MapDimensions, ObjectId, ObjectType, Position, TerrainKind, World, WorldError,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (u32, u32),
    player: (i32, i32),
    #[serde(default)]
    terrain: Vec<(i32, i32, TerrainKind)>, // (x, y, terrain)
    #[serde(default)]
    background: Vec<(i32, i32, ObjectType)>,
    #[serde(default)]
    crossings: Vec<(ObjectType, TerrainKind)>,
    #[serde(default)]
    spawns: Vec<(ObjectType, i32, i32)>,
}

/// A dynamic object to create once the world exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub object_type: ObjectType,
    pub position: Position,
}

/// A loaded map: the grid host plus its initial objects.
#[derive(Debug, Clone)]
pub struct MapLayout {
    pub map: GridMap,
    pub spawns: Vec<Spawn>,
}

/// Spawns every listed object into `world`, in file order.
pub fn spawn_all(spawns: &[Spawn], world: &mut World) -> Result<Vec<ObjectId>, WorldError> {
    spawns
        .iter()
        .map(|spawn| world.spawn(spawn.object_type.clone(), spawn.position))
        .collect()
}

/// Loader for map layouts from RON files.
pub struct MapLoader;

impl MapLoader {
    /// Load a map layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| e.context(format!("in {}", path.display())))
    }

    pub fn parse(content: &str) -> LoadResult<MapLayout> {
        let data: MapDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;

        let dimensions = MapDimensions::new(data.dimensions.0, data.dimensions.1);
        if dimensions.area() == 0 {
            anyhow::bail!("Map dimensions must be non-zero, got {:?}", data.dimensions);
        }

        let inside = |what: &str, position: Position| -> LoadResult<Position> {
            if dimensions.contains(position) {
                Ok(position)
            } else {
                Err(anyhow::anyhow!(
                    "{} at {} lies outside the {}x{} map",
                    what,
                    position,
                    dimensions.width,
                    dimensions.height
                ))
            }
        };

        let player = inside("Player start", data.player.into())?;
        let mut map = GridMap::new(dimensions, player);

        for (x, y, terrain) in data.terrain {
            let position = inside("Terrain", Position::new(x, y))?;
            map.set_terrain(position, terrain);
        }

        for (x, y, object_type) in data.background {
            let position = inside("Background tile", Position::new(x, y))?;
            map.place(position, object_type);
        }

        for (object_type, terrain) in data.crossings {
            map.allow_crossing(object_type, terrain);
        }

        let spawns = data
            .spawns
            .into_iter()
            .map(|(object_type, x, y)| -> LoadResult<Spawn> {
                let position = inside("Spawn", Position::new(x, y))?;
                Ok(Spawn {
                    object_type,
                    position,
                })
            })
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(MapLayout { map, spawns })
    }
}
