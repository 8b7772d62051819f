//! Text-level PDB handling.
//!
//! The pipeline never edits structures chemically; the transforms here are
//! deliberate line filters over PDB text: stripping heteroatom records from a
//! downloaded receptor, sanity-checking toolkit output, extracting the first
//! model from a multi-model pose file, and merging a receptor with a pose.

/// Record-name prefix filter: keep every line that is not a `HETATM` record.
///
/// Case- and column-exact on the record name, matching the file format rather
/// than any parsed interpretation of it.
pub fn strip_hetatm(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for line in content.lines() {
        if !line.starts_with("HETATM") {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Number of coordinate records (`ATOM` or `HETATM`) in PDB text.
pub fn atom_record_count(content: &str) -> usize {
    content
        .lines()
        .filter(|line| line.starts_with("ATOM") || line.starts_with("HETATM"))
        .count()
}

/// Extract the first model from multi-model PDB text.
///
/// Returns the coordinate and connectivity lines of the first model, without
/// the `MODEL`/`ENDMDL` wrappers. Single-model input passes through whole.
pub fn first_model(content: &str) -> String {
    let mut out = String::new();
    for line in content.lines() {
        if line.starts_with("ENDMDL") {
            break;
        }
        if line.starts_with("MODEL") || line.starts_with("END") {
            continue;
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Merge receptor and pose structures into one PDB text.
///
/// Keeps the receptor's coordinate lines, a `TER` break, then the pose's
/// coordinate lines, terminated by `END`. Everything else (headers, remarks,
/// CONECT) is dropped so the result loads cleanly in a viewer.
pub fn merge_structures(receptor: &str, pose: &str) -> String {
    let mut out = String::new();
    for line in receptor.lines() {
        if line.starts_with("ATOM") || line.starts_with("HETATM") {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("TER\n");
    for line in pose.lines() {
        if line.starts_with("ATOM") || line.starts_with("HETATM") {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("END\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
HEADER    HYDROLASE                               01-JAN-00   1ABC
ATOM      1  N   ALA A   1      11.104  13.207   9.247  1.00 20.00           N
ATOM      2  CA  ALA A   1      12.560  13.250   9.406  1.00 19.00           C
HETATM    3  O   HOH A 201      10.000  10.000  10.000  1.00 10.00           O
HETATM    4 ZN    ZN A 202       5.000   5.000   5.000  1.00 10.00          ZN
TER
END
";

    #[test]
    fn strip_hetatm_is_a_pure_line_filter() {
        let stripped = strip_hetatm(SAMPLE);
        assert!(!stripped.contains("HETATM"));
        assert!(stripped.contains("HEADER"));
        assert!(stripped.contains("ATOM      1"));
        assert!(stripped.contains("TER"));
        assert_eq!(atom_record_count(&stripped), 2);
    }

    #[test]
    fn strip_hetatm_is_column_exact() {
        // A record name merely containing the word is not a heteroatom record
        let content = "REMARK HETATM COUNTS BELOW\nHETATM    1  O   HOH A 1\n";
        let stripped = strip_hetatm(content);
        assert!(stripped.contains("REMARK"));
        assert!(!stripped.contains("HETATM    1"));
    }

    #[test]
    fn counts_both_record_kinds() {
        assert_eq!(atom_record_count(SAMPLE), 4);
        assert_eq!(atom_record_count("REMARK nothing\n"), 0);
    }

    #[test]
    fn first_model_cuts_at_endmdl() {
        let multi = "\
MODEL        1
ATOM      1  C   LIG A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  C   LIG A   1       1.000   1.000   1.000  1.00  0.00           C
ENDMDL
";
        let first = first_model(multi);
        assert_eq!(atom_record_count(&first), 1);
        assert!(first.contains("0.000"));
        assert!(!first.contains("MODEL"));
    }

    #[test]
    fn merge_keeps_coordinates_and_terminates() {
        let pose = "ATOM      1  C   LIG A   1       1.0     2.0     3.0  1.00  0.00           C\n";
        let merged = merge_structures(SAMPLE, pose);
        assert_eq!(atom_record_count(&merged), 5);
        assert!(!merged.contains("HEADER"));
        assert!(merged.contains("TER\n"));
        assert!(merged.trim_end().ends_with("END"));
    }
}
