//! Level Map
//!
//! ASCII grid levels. One character per cell:
//!
//! ```text
//! #  wall            S  player start
//! .  empty           H  health pickup
//! T  toaster         B  blender         M  microwave
//! ```
//!
//! Unknown characters are treated as empty floor. Rows may be ragged; short
//! rows are padded with empty cells. Reads outside the grid report a wall.

use std::fs;
use std::path::Path;

use macroquad::color::{Color, BROWN, DARKBROWN};
use macroquad::math::{vec3, Vec3};
use macroquad::models::{draw_cube, draw_cube_wires};

use super::enemy::{EnemyKind, ENEMY_HEIGHT};
use super::player::EYE_HEIGHT;

/// World units per grid cell
pub const CELL_SIZE: f32 = 4.0;
/// Height of a wall cell
pub const MAP_WALL_HEIGHT: f32 = 5.0;

const WALL_COLOR: Color = BROWN;
const WALL_EDGE_COLOR: Color = DARKBROWN;

/// Error type for map loading
#[derive(Debug)]
pub enum MapError {
    Io(std::io::Error),
    /// File contained no cells
    Empty,
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "IO error: {}", e),
            MapError::Empty => write!(f, "map has no cells"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            MapError::Empty => None,
        }
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    Start,
    Enemy(EnemyKind),
    Health,
}

impl Cell {
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => Cell::Wall,
            'S' => Cell::Start,
            'T' => Cell::Enemy(EnemyKind::Toaster),
            'B' => Cell::Enemy(EnemyKind::Blender),
            'M' => Cell::Enemy(EnemyKind::Microwave),
            'H' => Cell::Health,
            _ => Cell::Empty,
        }
    }
}

/// A loaded level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelMap {
    pub width: usize,
    pub height: usize,
    cells: Vec<Cell>,
    /// Camera position for the `S` cell (origin at eye height if none)
    pub player_start: Vec3,
    /// Enemy spawns in row-major order, already at enemy center height
    pub enemy_spawns: Vec<(EnemyKind, Vec3)>,
    /// Health pickup positions (floor level)
    pub pickups: Vec<Vec3>,
}

impl LevelMap {
    /// Parse a map from text
    pub fn parse_str(text: &str) -> Result<Self, MapError> {
        let rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.chars().filter(|c| *c != '\r').collect())
            .collect();

        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(MapError::Empty);
        }

        let mut map = Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            player_start: vec3(0.0, EYE_HEIGHT, 0.0),
            enemy_spawns: Vec::new(),
            pickups: Vec::new(),
        };

        for (z, row) in rows.iter().enumerate() {
            for (x, c) in row.iter().enumerate() {
                let cell = Cell::from_char(*c);
                map.cells[z * width + x] = cell;

                let world = map.grid_to_world(x, z);
                match cell {
                    Cell::Start => map.player_start = vec3(world.x, EYE_HEIGHT, world.z),
                    Cell::Enemy(kind) => map.enemy_spawns.push((kind, vec3(world.x, ENEMY_HEIGHT / 2.0, world.z))),
                    Cell::Health => map.pickups.push(world),
                    Cell::Empty | Cell::Wall => {}
                }
            }
        }

        Ok(map)
    }

    /// Load a map file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let map = Self::parse_str(&text)?;
        log::info!(
            "loaded map {}: {}x{}, {} walls, {} enemies, start at ({:.1}, {:.1}, {:.1})",
            path.display(),
            map.width,
            map.height,
            map.wall_count(),
            map.enemy_spawns.len(),
            map.player_start.x,
            map.player_start.y,
            map.player_start.z
        );
        Ok(map)
    }

    /// Cell at grid coordinates; anything outside the grid is a wall
    pub fn cell(&self, x: i32, z: i32) -> Cell {
        if x < 0 || z < 0 || x as usize >= self.width || z as usize >= self.height {
            return Cell::Wall;
        }
        self.cells[z as usize * self.width + x as usize]
    }

    /// Center of a cell at floor level, with the grid centered on the origin
    pub fn grid_to_world(&self, x: usize, z: usize) -> Vec3 {
        let half_w = self.width as f32 * CELL_SIZE / 2.0;
        let half_h = self.height as f32 * CELL_SIZE / 2.0;
        vec3(
            x as f32 * CELL_SIZE - half_w + CELL_SIZE / 2.0,
            0.0,
            z as f32 * CELL_SIZE - half_h + CELL_SIZE / 2.0,
        )
    }

    /// Grid coordinates containing a world position
    pub fn world_to_grid(&self, pos: Vec3) -> (i32, i32) {
        let half_w = self.width as f32 * CELL_SIZE / 2.0;
        let half_h = self.height as f32 * CELL_SIZE / 2.0;
        (
            ((pos.x + half_w) / CELL_SIZE).floor() as i32,
            ((pos.z + half_h) / CELL_SIZE).floor() as i32,
        )
    }

    /// Is the world position inside a wall cell (or off the map)?
    pub fn is_wall_at(&self, pos: Vec3) -> bool {
        let (x, z) = self.world_to_grid(pos);
        self.cell(x, z) == Cell::Wall
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Wall).count()
    }

    /// Draw wall cells as cubes
    pub fn draw(&self) {
        let size = vec3(CELL_SIZE, MAP_WALL_HEIGHT, CELL_SIZE);
        for z in 0..self.height {
            for x in 0..self.width {
                if self.cells[z * self.width + x] != Cell::Wall {
                    continue;
                }
                let mut pos = self.grid_to_world(x, z);
                pos.y = MAP_WALL_HEIGHT / 2.0;
                draw_cube(pos, size, None, WALL_COLOR);
                draw_cube_wires(pos, size, WALL_EDGE_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SMALL: &str = "#####\n#S.T#\n#.H.#\n#B.M#\n#####\n";

    #[test]
    fn test_parse_dimensions_and_cells() {
        let map = LevelMap::parse_str(SMALL).unwrap();
        assert_eq!((map.width, map.height), (5, 5));
        assert_eq!(map.cell(0, 0), Cell::Wall);
        assert_eq!(map.cell(1, 1), Cell::Start);
        assert_eq!(map.cell(2, 1), Cell::Empty);
        assert_eq!(map.cell(2, 2), Cell::Health);
        assert_eq!(map.wall_count(), 16);
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let map = LevelMap::parse_str("...\n...\n").unwrap();
        assert_eq!(map.cell(-1, 0), Cell::Wall);
        assert_eq!(map.cell(0, -1), Cell::Wall);
        assert_eq!(map.cell(3, 0), Cell::Wall);
        assert_eq!(map.cell(0, 2), Cell::Wall);
        assert_eq!(map.cell(2, 1), Cell::Empty);
    }

    #[test]
    fn test_ragged_rows_and_carriage_returns() {
        let map = LevelMap::parse_str("#\r\n###\r\n##").unwrap();
        assert_eq!((map.width, map.height), (3, 3));
        assert_eq!(map.cell(1, 0), Cell::Empty);
        assert_eq!(map.cell(2, 1), Cell::Wall);
        assert_eq!(map.cell(2, 2), Cell::Empty);
    }

    #[test]
    fn test_unknown_chars_are_empty() {
        let map = LevelMap::parse_str("x?#").unwrap();
        assert_eq!(map.cell(0, 0), Cell::Empty);
        assert_eq!(map.cell(1, 0), Cell::Empty);
        assert_eq!(map.cell(2, 0), Cell::Wall);
    }

    #[test]
    fn test_special_cells() {
        let map = LevelMap::parse_str(SMALL).unwrap();
        // 5 cells * 4 = 20 wide, centered: cell 1 -> 4 - 10 + 2 = -4
        assert_eq!(map.player_start, vec3(-4.0, EYE_HEIGHT, -4.0));

        let kinds: Vec<_> = map.enemy_spawns.iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![EnemyKind::Toaster, EnemyKind::Blender, EnemyKind::Microwave]);
        assert_eq!(map.enemy_spawns[0].1, vec3(4.0, 2.0, -4.0));
        assert_eq!(map.pickups, vec![vec3(0.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_no_start_defaults_to_origin() {
        let map = LevelMap::parse_str("...").unwrap();
        assert_eq!(map.player_start, vec3(0.0, EYE_HEIGHT, 0.0));
    }

    #[test]
    fn test_wall_lookup_by_world_position() {
        let map = LevelMap::parse_str(SMALL).unwrap();
        assert!(map.is_wall_at(vec3(-9.0, 1.8, 0.0)));
        assert!(!map.is_wall_at(vec3(-4.0, 1.8, -4.0)));
        assert!(map.is_wall_at(vec3(30.0, 1.8, 0.0)));
    }

    #[test]
    fn test_empty_map_is_an_error() {
        assert!(matches!(LevelMap::parse_str(""), Err(MapError::Empty)));
        assert!(matches!(LevelMap::parse_str("\n\n"), Err(MapError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let map = LevelMap::load(file.path()).unwrap();
        assert_eq!(map.enemy_spawns.len(), 3);
    }

    #[test]
    fn test_shipped_map_loads() {
        let map = LevelMap::load(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/maps/kitchen.txt")).unwrap();
        assert_eq!((map.width, map.height), (12, 12));
        assert!(!map.enemy_spawns.is_empty());
        assert!(!map.is_wall_at(map.player_start));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = LevelMap::load(dir.path().join("nope.txt"));
        assert!(matches!(result, Err(MapError::Io(_))));
    }
}
