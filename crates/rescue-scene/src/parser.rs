//! Snapshot file parser
//!
//! Tagged-block reader: every line is decoded into a [`Tag`]. Header tags
//! (`SURVIVORS:`, `OBSTACLES:`, `PATH:`) declare how many record lines
//! follow, and exactly that many lines are consumed as records. Blocks may
//! appear in any order; unknown lines are skipped.

use crate::error::{ParseError, ParseResult};
use crate::scene::{GridBounds, Point3, Scene, Survivor};
use std::path::Path;

/// Record block introduced by a header tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Survivors,
    Obstacles,
    Path,
}

impl Block {
    fn name(self) -> &'static str {
        match self {
            Self::Survivors => "SURVIVORS",
            Self::Obstacles => "OBSTACLES",
            Self::Path => "PATH",
        }
    }
}

/// Leading tag of a line, carrying the text after the colon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag<'a> {
    Grid(&'a str),
    Gen(&'a str),
    Fitness(&'a str),
    WorkerId(&'a str),
    Header(Block, &'a str),
    Unknown,
}

fn decode(line: &str) -> Tag<'_> {
    let Some((name, value)) = line.trim().split_once(':') else {
        return Tag::Unknown;
    };
    match name.trim_end() {
        "GRID" => Tag::Grid(value),
        "GEN" => Tag::Gen(value),
        "FITNESS" => Tag::Fitness(value),
        "WORKER_ID" => Tag::WorkerId(value),
        "SURVIVORS" => Tag::Header(Block::Survivors, value),
        "OBSTACLES" => Tag::Header(Block::Obstacles, value),
        "PATH" => Tag::Header(Block::Path, value),
        _ => Tag::Unknown,
    }
}

/// Exactly one whitespace-separated token
fn single_token(value: &str) -> Option<&str> {
    let mut tokens = value.split_whitespace();
    let token = tokens.next()?;
    tokens.next().is_none().then_some(token)
}

fn parse_grid(value: &str) -> Option<GridBounds> {
    let dims = value
        .split_whitespace()
        .map(|t| t.parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;
    match dims[..] {
        [x, y, z] => Some(GridBounds::new(x, y, z)),
        _ => None,
    }
}

/// Negative generations are the producer's "absent" sentinel
fn parse_generation(value: &str) -> Option<Option<u32>> {
    let raw: i64 = single_token(value)?.parse().ok()?;
    if raw < 0 {
        Some(None)
    } else {
        u32::try_from(raw).ok().map(Some)
    }
}

fn parse_coords(tokens: &[&str]) -> Option<Point3> {
    match tokens {
        [x, y, z, ..] => Some(Point3::new(x.parse().ok()?, y.parse().ok()?, z.parse().ok()?)),
        _ => None,
    }
}

fn parse_point(record: &str) -> Option<Point3> {
    let tokens: Vec<&str> = record.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }
    parse_coords(&tokens)
}

fn parse_survivor(record: &str) -> Option<Survivor> {
    let tokens: Vec<&str> = record.split_whitespace().collect();
    let position = parse_coords(&tokens)?;
    let priority = match tokens.get(3) {
        Some(token) => token.parse().ok()?,
        None => Survivor::DEFAULT_PRIORITY,
    };
    Some(Survivor::new(position, priority))
}

/// Snapshot parser
///
/// Stateless: every call builds a fresh [`Scene`], so parsing one file can
/// never leak into the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneParser;

impl SceneParser {
    /// Create new parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read and parse one file
    ///
    /// The file is read completely and closed before parsing starts.
    ///
    /// # Errors
    /// - `ParseError::Io` if the file cannot be read
    /// - see [`SceneParser::parse_str`] for content errors
    pub fn parse_file(&self, path: impl AsRef<Path>) -> ParseResult<Scene> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ParseError::io_error(path, e))?;
        tracing::debug!("Parsing {} ({} bytes)", path.display(), content.len());
        self.parse_str(&content)
    }

    /// Parse snapshot text
    ///
    /// # Errors
    /// - `ParseError::Truncated` if a header declares more records than remain
    /// - `ParseError::Malformed` on a non-numeric token or wrong record arity
    pub fn parse_str(&self, content: &str) -> ParseResult<Scene> {
        let lines: Vec<&str> = content.lines().collect();
        let mut scene = Scene::default();

        let mut i = 0;
        while i < lines.len() {
            let raw = lines[i];
            let line_number = i + 1;
            let malformed = || ParseError::malformed(line_number, raw);

            match decode(raw) {
                Tag::Grid(value) => {
                    scene.grid_bounds = parse_grid(value).ok_or_else(malformed)?;
                }
                Tag::Gen(value) => {
                    scene.generation = parse_generation(value).ok_or_else(malformed)?;
                }
                Tag::Fitness(value) => {
                    scene.fitness = single_token(value)
                        .and_then(|t| t.parse().ok())
                        .ok_or_else(malformed)?;
                }
                Tag::WorkerId(value) => {
                    let id = single_token(value)
                        .and_then(|t| t.parse().ok())
                        .ok_or_else(malformed)?;
                    scene.worker_id = Some(id);
                }
                Tag::Header(block, value) => {
                    let declared: usize = single_token(value)
                        .and_then(|t| t.parse().ok())
                        .ok_or_else(malformed)?;
                    let first = i + 1;
                    let available = lines.len() - first;
                    if declared > available {
                        return Err(ParseError::Truncated {
                            block: block.name(),
                            line_number,
                            declared,
                            available,
                        });
                    }

                    for (offset, record) in lines[first..first + declared].iter().enumerate() {
                        let record_line = first + offset + 1;
                        let bad = || ParseError::malformed(record_line, *record);
                        match block {
                            Block::Survivors => {
                                scene.survivors.push(parse_survivor(record).ok_or_else(bad)?);
                            }
                            Block::Obstacles => {
                                scene.obstacles.push(parse_point(record).ok_or_else(bad)?);
                            }
                            Block::Path => {
                                scene.path.push(parse_point(record).ok_or_else(bad)?);
                            }
                        }
                    }
                    tracing::debug!(
                        "{} block: {} records at line {}",
                        block.name(),
                        declared,
                        line_number
                    );
                    i += declared;
                }
                Tag::Unknown => {}
            }
            i += 1;
        }

        Ok(scene)
    }
}

/// Parse one file with a fresh [`SceneParser`]
///
/// # Errors
/// Same as [`SceneParser::parse_file`].
pub fn parse(path: impl AsRef<Path>) -> ParseResult<Scene> {
    SceneParser::new().parse_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "\
GRID: 10 10 5
GEN: 40
FITNESS: 812.50
WORKER_ID: 3
SURVIVORS: 2
1 2 3
4 5 1 7
OBSTACLES: 1
2 2 2
PATH: 3
0 0 0
1 1 1
1 2 3
";

    #[test]
    fn parses_every_block() {
        let scene = SceneParser::new().parse_str(FULL).unwrap();

        assert_eq!(scene.grid_bounds(), GridBounds::new(10, 10, 5));
        assert_eq!(scene.generation(), Some(40));
        assert!((scene.fitness() - 812.5).abs() < f64::EPSILON);
        assert_eq!(scene.worker_id(), Some(3));
        assert_eq!(scene.survivors().len(), 2);
        assert_eq!(scene.obstacles(), &[Point3::new(2, 2, 2)]);
        assert_eq!(scene.path_len(), 3);
        assert_eq!(scene.start(), Some(Point3::new(0, 0, 0)));
        assert_eq!(scene.end(), Some(Point3::new(1, 2, 3)));
    }

    #[test]
    fn survivor_priority_defaults_to_one() {
        let scene = SceneParser::new()
            .parse_str("SURVIVORS: 2\n2 3 4\n2 3 4 7\n")
            .unwrap();
        assert_eq!(scene.survivors()[0].priority, 1);
        assert_eq!(scene.survivors()[1].priority, 7);
    }

    #[test]
    fn survivor_extra_tokens_ignored() {
        let scene = SceneParser::new()
            .parse_str("SURVIVORS: 1\n2 3 4 7 99\n")
            .unwrap();
        assert_eq!(scene.survivors()[0], Survivor::new(Point3::new(2, 3, 4), 7));
    }

    #[test]
    fn missing_generation_is_absent() {
        let scene = SceneParser::new().parse_str("GRID: 1 1 1\n").unwrap();
        assert_eq!(scene.generation(), None);

        let scene = SceneParser::new().parse_str("GEN: 5\n").unwrap();
        assert_eq!(scene.generation(), Some(5));

        let scene = SceneParser::new().parse_str("GEN: -1\n").unwrap();
        assert_eq!(scene.generation(), None);
    }

    #[test]
    fn blocks_in_any_order() {
        let text = "PATH: 1\n3 3 3\nFITNESS: 2.5\nOBSTACLES: 1\n1 1 1\nGRID: 4 4 4\n";
        let scene = SceneParser::new().parse_str(text).unwrap();
        assert_eq!(scene.path(), &[Point3::new(3, 3, 3)]);
        assert_eq!(scene.obstacles(), &[Point3::new(1, 1, 1)]);
        assert_eq!(scene.grid_bounds(), GridBounds::new(4, 4, 4));
    }

    #[test]
    fn unknown_lines_skipped() {
        let text = "# produced by planner\n\nCOLOR: red\nGRID: 2 2 2\n   \nPATH: 0\n";
        let scene = SceneParser::new().parse_str(text).unwrap();
        assert_eq!(scene.grid_bounds(), GridBounds::new(2, 2, 2));
        assert!(scene.path().is_empty());
    }

    #[test]
    fn record_lines_are_not_reinterpreted_as_tags() {
        // Declared counts are trusted, so a tag-looking record is malformed
        let err = SceneParser::new()
            .parse_str("PATH: 2\n0 0 0\nGRID: 1 1 1\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line_number: 3, .. }));
    }

    #[test]
    fn truncated_block() {
        let err = SceneParser::new()
            .parse_str("PATH: 3\n0 0 0\n1 1 1\n")
            .unwrap_err();
        match err {
            ParseError::Truncated {
                block,
                line_number,
                declared,
                available,
            } => {
                assert_eq!(block, "PATH");
                assert_eq!(line_number, 1);
                assert_eq!(declared, 3);
                assert_eq!(available, 2);
            }
            other => panic!("expected truncation, got {other:?}"),
        }
    }

    #[test]
    fn truncated_at_end_of_input() {
        let err = SceneParser::new().parse_str("SURVIVORS: 1").unwrap_err();
        assert!(matches!(err, ParseError::Truncated { available: 0, .. }));
    }

    #[test]
    fn non_numeric_coordinate() {
        let err = SceneParser::new()
            .parse_str("GRID: 5 5 5\nOBSTACLES: 1\n1 x 3\n")
            .unwrap_err();
        match err {
            ParseError::Malformed {
                line_number,
                raw_text,
            } => {
                assert_eq!(line_number, 3);
                assert_eq!(raw_text, "1 x 3");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_fitness() {
        let err = SceneParser::new().parse_str("FITNESS: high\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line_number: 1, .. }));
    }

    #[test]
    fn bad_header_count() {
        let err = SceneParser::new().parse_str("PATH: many\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line_number: 1, .. }));

        let err = SceneParser::new().parse_str("PATH: -2\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { .. }));
    }

    #[test]
    fn path_record_arity_is_strict() {
        let err = SceneParser::new().parse_str("PATH: 1\n1 2\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line_number: 2, .. }));

        let err = SceneParser::new().parse_str("PATH: 1\n1 2 3 4\n").unwrap_err();
        assert!(matches!(err, ParseError::Malformed { line_number: 2, .. }));
    }

    #[test]
    fn grid_needs_three_dimensions() {
        assert!(SceneParser::new().parse_str("GRID: 5 5\n").is_err());
        assert!(SceneParser::new().parse_str("GRID: 5 5 5 5\n").is_err());
        assert!(SceneParser::new().parse_str("GRID: -1 5 5\n").is_err());
    }

    #[test]
    fn missing_grid_leaves_unknown_bounds() {
        let scene = SceneParser::new().parse_str("PATH: 1\n7 8 9\n").unwrap();
        assert!(scene.grid_bounds().is_unknown());
        assert_eq!(scene.path_len(), 1);
    }

    #[test]
    fn tag_without_space_after_colon() {
        let scene = SceneParser::new().parse_str("GRID:3 4 5\nFITNESS:1.5\n").unwrap();
        assert_eq!(scene.grid_bounds(), GridBounds::new(3, 4, 5));
        assert!((scene.fitness() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn repeated_blocks_append() {
        let text = "OBSTACLES: 1\n1 1 1\nOBSTACLES: 1\n2 2 2\nFITNESS: 1\nFITNESS: 2\n";
        let scene = SceneParser::new().parse_str(text).unwrap();
        assert_eq!(scene.obstacles().len(), 2);
        assert!((scene.fitness() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn windows_line_endings() {
        let scene = SceneParser::new()
            .parse_str("GRID: 2 2 2\r\nPATH: 1\r\n1 1 1\r\n")
            .unwrap();
        assert_eq!(scene.path(), &[Point3::new(1, 1, 1)]);
    }

    #[test]
    fn empty_input() {
        let scene = SceneParser::new().parse_str("").unwrap();
        assert_eq!(scene, Scene::default());
    }

    #[test]
    fn parsing_twice_is_identical() {
        let parser = SceneParser::new();
        let first = parser.parse_str(FULL).unwrap();
        let other = parser.parse_str("GRID: 1 1 1\n").unwrap();
        let second = parser.parse_str(FULL).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(other.survivors().is_empty());
    }
}
