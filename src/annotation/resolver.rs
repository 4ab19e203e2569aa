//! Decide which of two alleles is the reference allele.
//!
//! Pure and I/O free: the caller supplies the reference base.

use crate::core::types::FailureReason;

/// REF/ALT assignment for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlleleAssignment {
    pub reference: u8,
    pub alternate: u8,
    /// Both alleles were complemented before matching
    pub strand_flipped: bool,
}

/// Options for [`resolve_with`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// When neither allele matches, retry with complemented alleles
    pub allow_strand_flip: bool,
}

/// Watson-Crick complement; anything other than A/C/G/T is returned unchanged
#[must_use]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        other => other,
    }
}

fn is_nucleotide(base: u8) -> bool {
    matches!(base, b'A' | b'C' | b'G' | b'T')
}

/// Assign REF and ALT from the reference base and the two candidate alleles.
///
/// All bases are uppercased first. Exactly one allele must equal the
/// reference base; it becomes REF and the other becomes ALT.
///
/// # Errors
///
/// - `NoReferenceBase` if the reference base is not one of A/C/G/T
/// - `ReferenceOnlyAlleles` if both alleles equal the reference base
/// - `AlleleMismatch` if neither allele equals the reference base
pub fn resolve(ref_base: u8, allele1: u8, allele2: u8) -> Result<AlleleAssignment, FailureReason> {
    resolve_with(ref_base, allele1, allele2, ResolverOptions::default())
}

/// [`resolve`] with options.
///
/// With `allow_strand_flip`, a record whose alleles both miss the reference
/// base is retried on the opposite strand; a match there emits the
/// complemented pair.
///
/// # Errors
///
/// Same as [`resolve`]. A strand-flip retry can also produce
/// `ReferenceOnlyAlleles` when both complemented alleles equal the reference.
pub fn resolve_with(
    ref_base: u8,
    allele1: u8,
    allele2: u8,
    options: ResolverOptions,
) -> Result<AlleleAssignment, FailureReason> {
    let ref_base = ref_base.to_ascii_uppercase();
    let allele1 = allele1.to_ascii_uppercase();
    let allele2 = allele2.to_ascii_uppercase();

    if !is_nucleotide(ref_base) {
        return Err(FailureReason::NoReferenceBase);
    }

    match assign(ref_base, allele1, allele2, false) {
        Err(FailureReason::AlleleMismatch) if options.allow_strand_flip => {
            assign(ref_base, complement(allele1), complement(allele2), true)
        }
        result => result,
    }
}

fn assign(
    ref_base: u8,
    allele1: u8,
    allele2: u8,
    strand_flipped: bool,
) -> Result<AlleleAssignment, FailureReason> {
    match (allele1 == ref_base, allele2 == ref_base) {
        (true, false) => Ok(AlleleAssignment {
            reference: allele1,
            alternate: allele2,
            strand_flipped,
        }),
        (false, true) => Ok(AlleleAssignment {
            reference: allele2,
            alternate: allele1,
            strand_flipped,
        }),
        (true, true) => Err(FailureReason::ReferenceOnlyAlleles),
        (false, false) => Err(FailureReason::AlleleMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &AlleleAssignment) -> (char, char) {
        (char::from(a.reference), char::from(a.alternate))
    }

    #[test]
    fn test_first_allele_is_reference() {
        let a = resolve(b'A', b'A', b'T').unwrap();
        assert_eq!(pair(&a), ('A', 'T'));
        assert!(!a.strand_flipped);
    }

    #[test]
    fn test_second_allele_is_reference() {
        let a = resolve(b'A', b'T', b'A').unwrap();
        assert_eq!(pair(&a), ('A', 'T'));
    }

    #[test]
    fn test_case_is_normalized() {
        let a = resolve(b'g', b'c', b'G').unwrap();
        assert_eq!(pair(&a), ('G', 'C'));
    }

    #[test]
    fn test_neither_allele_matches() {
        assert_eq!(resolve(b'A', b'G', b'T'), Err(FailureReason::AlleleMismatch));
    }

    #[test]
    fn test_both_alleles_match() {
        assert_eq!(
            resolve(b'C', b'C', b'c'),
            Err(FailureReason::ReferenceOnlyAlleles)
        );
    }

    #[test]
    fn test_ambiguous_reference_base() {
        assert_eq!(resolve(b'N', b'A', b'C'), Err(FailureReason::NoReferenceBase));
        assert_eq!(resolve(b'n', b'N', b'C'), Err(FailureReason::NoReferenceBase));
    }

    #[test]
    fn test_strand_flip_is_opt_in() {
        // Panel reports G/T on the opposite strand of reference A
        assert_eq!(resolve(b'A', b'G', b'T'), Err(FailureReason::AlleleMismatch));

        let options = ResolverOptions {
            allow_strand_flip: true,
        };
        let a = resolve_with(b'A', b'G', b'T', options).unwrap();
        assert_eq!(pair(&a), ('A', 'C'));
        assert!(a.strand_flipped);
    }

    #[test]
    fn test_strand_flip_not_used_when_direct_match() {
        let options = ResolverOptions {
            allow_strand_flip: true,
        };
        let a = resolve_with(b'A', b'A', b'T', options).unwrap();
        assert_eq!(pair(&a), ('A', 'T'));
        assert!(!a.strand_flipped);
    }

    #[test]
    fn test_strand_flip_still_mismatches() {
        let options = ResolverOptions {
            allow_strand_flip: true,
        };
        // Complements are C/G, neither is A
        assert_eq!(
            resolve_with(b'A', b'G', b'C', options),
            Err(FailureReason::AlleleMismatch)
        );
    }
}
