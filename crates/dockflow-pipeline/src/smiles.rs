//! Lexical SMILES validation.
//!
//! The pipeline does not interpret molecular graphs; it only needs to reject
//! strings that cannot possibly be SMILES before handing them to the external
//! toolkit. The check is a single pass over the line notation: legal atom and
//! bond tokens, balanced brackets and branches, paired ring-closure digits.

/// Atom symbols legal outside brackets (the SMILES organic subset), longest
/// match first.
const ORGANIC_SUBSET: &[&str] = &[
    "Cl", "Br", "B", "C", "N", "O", "P", "S", "F", "I", "b", "c", "n", "o", "p", "s",
];

const BOND_CHARS: &[char] = &['-', '=', '#', '$', ':', '/', '\\', '.'];

/// Check whether a string lexes as SMILES.
///
/// Returns the reason for rejection, phrased for the skip log. Accepting a
/// string here does not guarantee the toolkit can embed it; the later
/// preparation steps catch chemically impossible inputs.
pub fn validate(smiles: &str) -> Result<(), String> {
    if smiles.is_empty() {
        return Err("empty string".to_string());
    }
    if smiles.chars().any(char::is_whitespace) {
        return Err("contains whitespace".to_string());
    }

    let mut paren_depth: i32 = 0;
    let mut ring_closures: [u32; 100] = [0; 100];
    let bytes = smiles.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let rest = &smiles[i..];
        let c = bytes[i] as char;

        // Bracket atoms: consume through the matching ']', require content
        if c == '[' {
            match rest.find(']') {
                Some(1) => return Err("empty bracket atom".to_string()),
                Some(end) => {
                    i += end + 1;
                    continue;
                }
                None => return Err("unclosed bracket atom".to_string()),
            }
        }
        if c == ']' {
            return Err("unmatched ']'".to_string());
        }

        if c == '(' {
            paren_depth += 1;
            i += 1;
            continue;
        }
        if c == ')' {
            paren_depth -= 1;
            if paren_depth < 0 {
                return Err("unmatched ')'".to_string());
            }
            i += 1;
            continue;
        }

        if let Some(digit) = c.to_digit(10) {
            ring_closures[digit as usize] += 1;
            i += 1;
            continue;
        }
        // Two-digit ring closures: %nn
        if c == '%' {
            let two = rest.get(1..3).and_then(|s| s.parse::<usize>().ok());
            match two {
                Some(n) => {
                    ring_closures[n] += 1;
                    i += 3;
                    continue;
                }
                None => return Err("malformed '%' ring closure".to_string()),
            }
        }

        if BOND_CHARS.contains(&c) {
            i += 1;
            continue;
        }

        if let Some(symbol) = ORGANIC_SUBSET.iter().find(|s| rest.starts_with(**s)) {
            i += symbol.len();
            continue;
        }

        return Err(format!("unexpected character '{c}'"));
    }

    if paren_depth != 0 {
        return Err("unclosed '('".to_string());
    }
    if let Some(digit) = ring_closures.iter().position(|&n| n % 2 != 0) {
        return Err(format!("unpaired ring closure '{digit}'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_molecules() {
        assert!(validate("CCO").is_ok());
        assert!(validate("CC(=O)O").is_ok());
        assert!(validate("c1ccccc1").is_ok());
        assert!(validate("CC(C)Cc1ccc(cc1)C(C)C(=O)O").is_ok());
        assert!(validate("ClCCBr").is_ok());
        assert!(validate("[Na+].[Cl-]").is_ok());
        assert!(validate("C%10CC%10").is_ok());
        assert!(validate("C/C=C/C").is_ok());
    }

    #[test]
    fn rejects_obvious_garbage() {
        assert!(validate("not-a-smiles").is_err());
        assert!(validate("").is_err());
        assert!(validate("CC O").is_err());
        assert!(validate("hello world").is_err());
    }

    #[test]
    fn rejects_unbalanced_structure() {
        assert!(validate("CC(=O").is_err());
        assert!(validate("CC)O").is_err());
        assert!(validate("[NH4").is_err());
        assert!(validate("C1CC").is_err());
        assert!(validate("[]C").is_err());
        assert!(validate("C%1C").is_err());
    }

    #[test]
    fn rejection_reason_is_descriptive() {
        let reason = validate("not-a-smiles").unwrap_err();
        assert!(reason.contains("unexpected character"));
        assert_eq!(validate("C1CC").unwrap_err(), "unpaired ring closure '1'");
    }
}
