//! Material definition parser
//!
//! Parses the line-oriented material format: each line's first two
//! characters select the directive: `ne` introduces a material name,
//! `Kd` its diffuse RGB and `Ks` its specular RGB. Colors apply to the
//! most recently named material, and the three output vectors stay parallel
//! in declaration order.

use super::ParseError;

/// Parsed material definitions: three parallel per-material arrays.
#[derive(Debug, Clone, Default)]
pub struct MaterialSet {
    /// Material names in declaration order
    pub names: Vec<String>,
    /// Diffuse RGB per material
    pub diffuses: Vec<[f32; 3]>,
    /// Specular RGB per material
    pub speculars: Vec<[f32; 3]>,
}

impl MaterialSet {
    /// Number of materials.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when no materials were declared.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of a material by name, if declared.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

/// Parse a material source into a [`MaterialSet`].
///
/// Declaring at least one material is a hard precondition of geometry
/// parsing, so an input with no `ne` directive is a [`ParseError`].
/// Malformed color fields parse as `0.0` rather than failing the line; this
/// leniency is part of the format's contract.
pub fn parse_materials(source: &str) -> Result<MaterialSet, ParseError> {
    let mut set = MaterialSet::default();

    for line in source.lines() {
        let (directive, content) = split_directive(line);

        match directive {
            "ne" => set.names.push(content.to_string()),
            "Kd" => set.diffuses.push(parse_vec3(content)),
            "Ks" => set.speculars.push(parse_vec3(content)),
            _ => {}
        }
    }

    if set.is_empty() {
        return Err(ParseError::NoMaterials);
    }

    // Colors apply per declared material; pad short streams so the arrays
    // stay parallel even for sources that omit Kd/Ks lines.
    set.diffuses.resize(set.names.len(), [0.0; 3]);
    set.speculars.resize(set.names.len(), [0.0; 3]);

    log::debug!("parsed {} material(s)", set.len());
    Ok(set)
}

/// Split a line into its two-character directive and the remainder after the
/// first token.
pub(crate) fn split_directive(line: &str) -> (&str, &str) {
    let directive = line.get(..2).unwrap_or("");
    let content = line
        .split_once(char::is_whitespace)
        .map_or("", |(_, rest)| rest.trim());
    (directive, content)
}

/// Parse up to three whitespace-separated floats; missing or malformed
/// fields degrade to 0.0.
pub(crate) fn parse_vec3(content: &str) -> [f32; 3] {
    let mut fields = content.split_whitespace();
    let mut next = || fields.next().and_then(|t| t.parse().ok()).unwrap_or(0.0);
    [next(), next(), next()]
}

/// Parse up to two whitespace-separated floats; missing or malformed fields
/// degrade to 0.0.
pub(crate) fn parse_vec2(content: &str) -> [f32; 2] {
    let mut fields = content.split_whitespace();
    let mut next = || fields.next().and_then(|t| t.parse().ok()).unwrap_or(0.0);
    [next(), next()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_material() {
        let source = "ne red\nKd 1 0 0\nKs 0.5 0.5 0.5\n";
        let set = parse_materials(source).unwrap();

        assert_eq!(set.names, vec!["red".to_string()]);
        assert_eq!(set.diffuses, vec![[1.0, 0.0, 0.0]]);
        assert_eq!(set.speculars, vec![[0.5, 0.5, 0.5]]);
    }

    #[test]
    fn parses_materials_in_declaration_order() {
        let source = "ne first\nKd 1 0 0\nKs 1 1 1\nne second\nKd 0 1 0\nKs 0 0 0\n";
        let set = parse_materials(source).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of("first"), Some(0));
        assert_eq!(set.index_of("second"), Some(1));
        assert_eq!(set.diffuses[1], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_source_is_an_error() {
        assert!(matches!(parse_materials(""), Err(ParseError::NoMaterials)));
    }

    #[test]
    fn malformed_color_fields_degrade_to_zero() {
        let source = "ne broken\nKd one 0.5\n";
        let set = parse_materials(source).unwrap();

        assert_eq!(set.diffuses[0], [0.0, 0.5, 0.0]);
        // No Ks line: the specular stream is padded to stay parallel.
        assert_eq!(set.speculars[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_directives_are_ignored() {
        let source = "# comment\nne mat\nKa 9 9 9\nKd 0.2 0.4 0.6\n";
        let set = parse_materials(source).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.diffuses[0], [0.2, 0.4, 0.6]);
    }
}
