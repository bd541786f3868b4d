use crate::{Error, Result};
use std::{path::Path, str::FromStr};

/// Cell offsets `(dx, dy)` shared by every glider: a vertical line of three.
const GLIDER_SPINE: [(i64, i64); 3] = [(0, 0), (0, 1), (0, 2)];

/// The two cells that accompany the spine, indexed by [`Orientation`].
const GLIDER_WINGS: [[(i64, i64); 2]; 4] = [
    [(-1, 0), (-2, 1)], // NE
    [(1, 0), (2, 1)],   // NW
    [(1, 2), (2, 1)],   // SW
    [(-1, 2), (-2, 1)], // SE
];

/// Displacement `(dx, dy)` of a glider after one full period, indexed by [`Orientation`].
/// Rows grow downwards, so "north" is negative `dy`.
const GLIDER_HEADINGS: [(i64, i64); 4] = [(1, -1), (-1, -1), (-1, 1), (1, 1)];

/// Number of generations after which a glider repeats its shape.
pub const GLIDER_PERIOD: u64 = 4;

/// Direction of travel of a glider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    NE,
    NW,
    SW,
    SE,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [Self::NE, Self::NW, Self::SW, Self::SE];

    /// Offsets of the five glider cells relative to the top of its spine.
    pub fn glider_cells(self) -> [(i64, i64); 5] {
        let [w0, w1] = GLIDER_WINGS[self as usize];
        let [s0, s1, s2] = GLIDER_SPINE;
        [s0, s1, s2, w0, w1]
    }

    /// How far a glider with this orientation moves every [`GLIDER_PERIOD`] generations.
    pub fn heading(self) -> (i64, i64) {
        GLIDER_HEADINGS[self as usize]
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ne" => Ok(Self::NE),
            "nw" => Ok(Self::NW),
            "sw" => Ok(Self::SW),
            "se" => Ok(Self::SE),
            _ => Err(Error::InvalidArgument(format!(
                "unknown orientation \"{s}\", expected one of ne, nw, sw, se"
            ))),
        }
    }
}

/// A declarative description of cells to bring to life.
///
/// Shapes only ever add alive cells; see [`Seeder::plant`](crate::Seeder::plant).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Explicit `(x, y)` coordinates. Every one must be inside the grid.
    Cells(Vec<(i64, i64)>),
    /// The half-open rectangle `[x, x + width) x [y, y + height)`, clipped to the grid.
    Rectangle {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    /// A glider whose spine starts at `(x, y)`. Must fit in the grid.
    Glider {
        x: usize,
        y: usize,
        orientation: Orientation,
    },
    /// Each cell independently alive with probability `density`.
    /// A fixed `seed` makes the fill reproducible.
    Random { density: f64, seed: Option<u64> },
}

/// Supported seed source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedFormat {
    /// Whitespace-separated integer pairs `x y`, one alive cell per pair.
    /// There is no header and parsing stops at the end of the input.
    ///
    /// ```text
    /// 10 2
    /// 10 3  10 4
    /// ```
    Coordinates,

    /// [Extended RLE](https://golly.sourceforge.io/Help/formats.html#rle) format,
    /// two states and the B3/S23 rule only. The pattern is placed at the origin.
    Rle,
}

impl SeedFormat {
    /// Picks the format from the file extension: `.rle` is RLE, anything else
    /// is read as coordinate pairs.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("rle") => Self::Rle,
            _ => Self::Coordinates,
        }
    }

    /// Parses `data` into the list of alive `(x, y)` cells it describes.
    /// No bounds are checked here besides those of the format itself.
    pub fn parse(self, data: &str) -> Result<Vec<(i64, i64)>> {
        match self {
            Self::Coordinates => parse_coordinates(data),
            Self::Rle => parse_rle(data),
        }
    }
}

fn parse_coordinates(data: &str) -> Result<Vec<(i64, i64)>> {
    let mut cells = vec![];
    let mut pending_x: Option<(usize, i64)> = None;

    for (line_no, line) in data.lines().enumerate().map(|(i, line)| (i + 1, line)) {
        for token in line.split_whitespace() {
            let value = token.parse::<i64>().map_err(|_| {
                Error::format(line_no, format!("expected an integer, found \"{token}\""))
            })?;
            match pending_x.take() {
                Some((_, x)) => cells.push((x, value)),
                None => pending_x = Some((line_no, value)),
            }
        }
    }

    if let Some((line_no, x)) = pending_x {
        return Err(Error::format(
            line_no,
            format!("coordinate x = {x} has no matching y"),
        ));
    }
    Ok(cells)
}

fn parse_rle(data: &str) -> Result<Vec<(i64, i64)>> {
    let mut lines = data
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    // Parse header
    let (header_no, header) = lines
        .next()
        .ok_or_else(|| Error::format(1, "missing header"))?;
    let mut parts = header.split(',').map(str::trim);
    let width = header_number(parts.next(), "x", header_no)?;
    let height = header_number(parts.next(), "y", header_no)?;

    // rule is optional
    if let Some(rule) = header_value(parts.next(), "rule", header_no)? {
        if !rule.eq_ignore_ascii_case("B3/S23") {
            return Err(Error::format(header_no, "only the B3/S23 rule is supported"));
        }
    }

    // Parse pattern data
    let mut cells = vec![];
    let (mut x, mut y, mut count) = (0i64, 0i64, 0i64);
    'outer: for (line_no, line) in lines {
        for c in line.chars() {
            match c {
                '0'..='9' => {
                    count = count
                        .checked_mul(10)
                        .and_then(|count| count.checked_add(c as i64 - '0' as i64))
                        .ok_or_else(|| Error::format(line_no, "run count is too large"))?;
                    continue;
                }
                'b' => x = advance(x, count, line_no)?,
                'o' => {
                    let end = advance(x, count, line_no)?;
                    if end > width || y >= height {
                        return Err(Error::format(
                            line_no,
                            format!("pattern data out of bounds: x = {}, y = {}", end - 1, y),
                        ));
                    }
                    cells.extend((x..end).map(|x| (x, y)));
                    x = end;
                }
                '$' => {
                    y = advance(y, count, line_no)?;
                    x = 0;
                    if y > height {
                        return Err(Error::format(
                            line_no,
                            format!("pattern data out of bounds: y = {y}"),
                        ));
                    }
                }
                '!' => break 'outer,
                ' ' | '\t' => continue,
                _ => {
                    return Err(Error::format(
                        line_no,
                        format!("invalid RLE character: '{c}'"),
                    ))
                }
            }
            count = 0;
            if x > width {
                return Err(Error::format(
                    line_no,
                    format!("pattern data out of bounds: x = {x}, y = {y}"),
                ));
            }
        }
    }
    Ok(cells)
}

/// Moves an RLE cursor by a run of `count` cells (1 if no count was given).
fn advance(position: i64, count: i64, line: usize) -> Result<i64> {
    position
        .checked_add(count.max(1))
        .ok_or_else(|| Error::format(line, "pattern data out of bounds"))
}

/// Splits one `key = value` item of an RLE header, checking the key.
fn header_value<'a>(
    part: Option<&'a str>,
    expected_key: &str,
    line: usize,
) -> Result<Option<&'a str>> {
    let Some(part) = part else {
        return Ok(None);
    };
    let mut items = part.split('=');
    let key = items.next().unwrap_or_default().trim();
    if key != expected_key {
        return Err(Error::format(
            line,
            format!("invalid header: expected \"{expected_key}\", got \"{key}\""),
        ));
    }
    let value = items.next().unwrap_or_default().trim();
    if items.next().is_some() {
        return Err(Error::format(line, "invalid header: missing ',' between '='"));
    }
    Ok(Some(value))
}

fn header_number(part: Option<&str>, key: &str, line: usize) -> Result<i64> {
    let value = header_value(part, key, line)?
        .ok_or_else(|| Error::format(line, format!("invalid header: missing \"{key}\"")))?;
    value.parse().map_err(|_| {
        Error::format(
            line,
            format!("invalid header: \"{key}\" is not a number: \"{value}\""),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_str() {
        assert_eq!("se".parse::<Orientation>().unwrap(), Orientation::SE);
        assert_eq!("NW".parse::<Orientation>().unwrap(), Orientation::NW);
        assert!(matches!(
            "north".parse::<Orientation>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_glider_cells_share_spine() {
        for orientation in Orientation::ALL {
            let cells = orientation.glider_cells();
            assert_eq!(&cells[..3], &[(0, 0), (0, 1), (0, 2)]);
        }
        assert_eq!(Orientation::SE.glider_cells()[3..], [(-1, 2), (-2, 1)]);
        assert_eq!(Orientation::NW.glider_cells()[3..], [(1, 0), (2, 1)]);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SeedFormat::from_path(Path::new("gun.rle")), SeedFormat::Rle);
        assert_eq!(SeedFormat::from_path(Path::new("GUN.RLE")), SeedFormat::Rle);
        assert_eq!(
            SeedFormat::from_path(Path::new("Initial cells.txt")),
            SeedFormat::Coordinates
        );
        assert_eq!(
            SeedFormat::from_path(Path::new("cells")),
            SeedFormat::Coordinates
        );
    }

    #[test]
    fn test_parse_coordinates() {
        let cells = parse_coordinates("10 2\n10 3   10\n4\n\n").unwrap();
        assert_eq!(cells, vec![(10, 2), (10, 3), (10, 4)]);
        assert_eq!(parse_coordinates("").unwrap(), vec![]);
        // negative values are parsed, bounds are checked by the seeder
        assert_eq!(parse_coordinates("-1 5").unwrap(), vec![(-1, 5)]);
    }

    #[test]
    fn test_parse_coordinates_errors() {
        let err = parse_coordinates("1 2\n3 x\n").unwrap_err();
        assert!(matches!(err, Error::Format { line: 2, .. }), "{err}");

        let err = parse_coordinates("1 2\n3\n").unwrap_err();
        assert!(matches!(err, Error::Format { line: 2, .. }), "{err}");

        let err = parse_coordinates("1.5 2").unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }), "{err}");
    }

    #[test]
    fn test_parse_rle_glider() {
        let rle = "#N Glider\n#C a comment\nx = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n";
        let cells = parse_rle(rle).unwrap();
        assert_eq!(cells, vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn test_parse_rle_multiline_and_blank_rows() {
        let rle = "x = 4, y = 4\n2o$\n2$\n3bo!";
        let cells = parse_rle(rle).unwrap();
        assert_eq!(cells, vec![(0, 0), (1, 0), (3, 3)]);
    }

    #[test]
    fn test_parse_rle_errors() {
        assert!(matches!(parse_rle(""), Err(Error::Format { .. })));
        assert!(matches!(
            parse_rle("x = 3, y = 3, rule = B36/S23\n3o!"),
            Err(Error::Format { line: 1, .. })
        ));
        assert!(matches!(
            parse_rle("y = 3, x = 3\n3o!"),
            Err(Error::Format { line: 1, .. })
        ));
        assert!(matches!(
            parse_rle("x = 2, y = 1\n3o!"),
            Err(Error::Format { line: 2, .. })
        ));
        assert!(matches!(
            parse_rle("x = 3, y = 1\nbxo!"),
            Err(Error::Format { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_rle_huge_runs() {
        for data in [
            "x = 3, y = 3\n9223372036854775807$9223372036854775807$o!",
            "x = 3, y = 3\n1b9223372036854775807b!",
            "x = 3, y = 3\nbo9223372036854775807o!",
            "x = 3, y = 3\n4$o!",
        ] {
            let err = parse_rle(data).unwrap_err();
            assert!(matches!(err, Error::Format { line: 2, .. }), "{data:?}: {err}");
        }
        // trailing blank rows up to the height are fine
        assert_eq!(parse_rle("x = 1, y = 3\no3$!").unwrap(), vec![(0, 0)]);
    }
}
