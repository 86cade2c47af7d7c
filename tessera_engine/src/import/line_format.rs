/// Line-oriented triangle mesh format.
///
/// ```text
/// # comment
/// v  x y z          position
/// vt u v            texture coordinate
/// vn x y z          normal
/// f  p/t/n p/t/n p/t/n
/// ```
///
/// Face corners use 1-based indices. `t` and `n` are optional (`p`, `p/t`,
/// `p//n`, `p/t/n`). Blank lines, comments and unknown prefixes are skipped.
/// Extra numeric tokens after `v`, `vt` or `vn` are ignored.
///
/// Parsing is all-or-nothing: the first malformed line aborts with
/// `Error::Parse` carrying the 1-based line number.

use crate::error::{Error, ParseErrorKind, Result};

/// Indices of one face corner, 0-based; `None` when the corner omits it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceIndexGroup {
    pub position: usize,
    pub uv: Option<usize>,
    pub normal: Option<usize>,
}

/// One triangle and the line it was declared on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub line: usize,
    pub corners: [FaceIndexGroup; 3],
}

/// Attribute lists and faces exactly as declared in the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineFormatData {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub normals: Vec<[f32; 3]>,
    pub faces: Vec<Face>,
}

impl LineFormatData {
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }
}

/// Parse the whole text. Face indices are checked against the declared lists
/// once every line has been read.
pub fn parse(source: &str) -> Result<LineFormatData> {
    let mut data = LineFormatData::default();

    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw_line.split_whitespace();
        let Some(prefix) = tokens.next() else {
            continue;
        };
        if prefix.starts_with('#') {
            continue;
        }
        let args: Vec<&str> = tokens.collect();

        match prefix {
            "v" => data.positions.push(parse_floats::<3>(&args, line)?),
            "vt" => data.uvs.push(parse_floats::<2>(&args, line)?),
            "vn" => data.normals.push(parse_floats::<3>(&args, line)?),
            "f" => data.faces.push(parse_face(&args, line)?),
            _ => {}
        }
    }

    check_face_indices(&data)?;

    crate::engine_debug!(
        "tessera::import::LineFormat",
        "Parsed {} positions, {} uvs, {} normals, {} faces",
        data.positions.len(),
        data.uvs.len(),
        data.normals.len(),
        data.faces.len()
    );
    Ok(data)
}

fn parse_error(line: usize, kind: ParseErrorKind) -> Error {
    crate::engine_err!("tessera::import::LineFormat", Error::Parse { line, kind })
}

fn parse_floats<const N: usize>(args: &[&str], line: usize) -> Result<[f32; N]> {
    if args.len() < N {
        return Err(parse_error(line, ParseErrorKind::MissingToken {
            expected: N,
            found: args.len(),
        }));
    }
    let mut values = [0.0f32; N];
    for (value, token) in values.iter_mut().zip(args) {
        *value = token
            .parse::<f32>()
            .map_err(|_| parse_error(line, ParseErrorKind::InvalidNumber(token.to_string())))?;
    }
    Ok(values)
}

fn parse_face(args: &[&str], line: usize) -> Result<Face> {
    match args.len() {
        0..=2 => {
            return Err(parse_error(line, ParseErrorKind::MissingToken {
                expected: 3,
                found: args.len(),
            }))
        }
        3 => {}
        n => {
            return Err(parse_error(
                line,
                ParseErrorKind::InvalidFace(format!("{} corners, only triangles are supported", n)),
            ))
        }
    }

    Ok(Face {
        line,
        corners: [
            parse_corner(args[0], line)?,
            parse_corner(args[1], line)?,
            parse_corner(args[2], line)?,
        ],
    })
}

/// Parse `p`, `p/t`, `p//n` or `p/t/n` into 0-based indices
fn parse_corner(token: &str, line: usize) -> Result<FaceIndexGroup> {
    let parts: Vec<&str> = token.split('/').collect();
    if parts.len() > 3 {
        return Err(parse_error(line, ParseErrorKind::InvalidFace(token.to_string())));
    }

    let index = |part: &str| -> Result<usize> {
        match part.parse::<usize>() {
            Ok(value) if value >= 1 => Ok(value - 1),
            _ => Err(parse_error(line, ParseErrorKind::InvalidFace(token.to_string()))),
        }
    };
    let optional = |part: Option<&&str>| -> Result<Option<usize>> {
        match part {
            Some(p) if !p.is_empty() => index(*p).map(Some),
            _ => Ok(None),
        }
    };

    Ok(FaceIndexGroup {
        position: index(parts[0])?,
        uv: optional(parts.get(1))?,
        normal: optional(parts.get(2))?,
    })
}

fn check_face_indices(data: &LineFormatData) -> Result<()> {
    for face in &data.faces {
        for corner in &face.corners {
            let checks = [
                ("position", Some(corner.position), data.positions.len()),
                ("uv", corner.uv, data.uvs.len()),
                ("normal", corner.normal, data.normals.len()),
            ];
            for (attribute, index, len) in checks {
                if let Some(index) = index {
                    if index >= len {
                        return Err(parse_error(
                            face.line,
                            ParseErrorKind::IndexOutOfRange { attribute, index, len },
                        ));
                    }
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "line_format_tests.rs"]
mod tests;
