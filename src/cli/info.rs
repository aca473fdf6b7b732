use crate::cli::{parse_unsigned, Transform, TransformKind};
use crate::error::Result;
use crate::permutation::Permutation;
use crate::shuffle::{format_mapping, format_tuple};
use serde::Serialize;

/// Structural summary of a transform, printable as text or JSON
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub kind: String,
    pub display: String,
    pub length: usize,
    pub packed: String,
    pub identity: bool,
    /// `"all"` or a count. Left out for shuffles, whose two parts fix
    /// different things.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_points: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permutation: Option<PermutationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermutationReport {
    pub mapping: Vec<usize>,
    pub involution: bool,
    pub derangement: bool,
    pub cycles: Vec<Vec<usize>>,
    pub lehmer_code: Vec<usize>,
    pub inversion_count: usize,
}

impl PermutationReport {
    fn new(permutation: &Permutation) -> Self {
        Self {
            mapping: permutation.as_tuple().to_vec(),
            involution: permutation.is_involution(),
            derangement: permutation.is_derangement(),
            cycles: permutation.as_cycles(),
            lehmer_code: permutation.as_lehmer_code(),
            inversion_count: permutation.get_inversion_count(),
        }
    }
}

/// Summarize a transform
pub fn report(transform: &Transform) -> TransformReport {
    let (display, identity, fixed_points, permutation, mask) = match transform {
        Transform::Permutation(p) => (
            p.to_string(),
            p.is_identity(),
            Some(describe_fixed_points(p.fixed_point_count())),
            Some(PermutationReport::new(p)),
            None,
        ),
        Transform::Inversion(i) => (
            i.to_string(),
            i.is_identity(),
            Some(describe_fixed_points(i.fixed_point_count())),
            None,
            Some(format!("{:#x}", i.mask())),
        ),
        Transform::Shuffle(s) => (
            format_tuple(&s.as_tuple()),
            s.is_identity(),
            None,
            Some(PermutationReport::new(s.permutation())),
            Some(format!("{:#x}", s.inversion().mask())),
        ),
    };

    TransformReport {
        kind: transform.name().to_string(),
        display,
        length: transform.len(),
        packed: transform.pack().to_string(),
        identity,
        fixed_points,
        permutation,
        mask,
    }
}

fn describe_fixed_points(count: Option<usize>) -> String {
    match count {
        Some(count) => count.to_string(),
        None => "all".to_string(),
    }
}

/// Render a report as text
pub fn format_report(report: &TransformReport) -> String {
    let mut output = String::new();

    output.push_str("Bit Transform Information\n");
    output.push_str("=========================\n\n");

    output.push_str(&format!("Kind: {}\n", report.kind));
    output.push_str(&format!("Value: {}\n", report.display));
    output.push_str(&format!("Length: {}\n", report.length));
    output.push_str(&format!("Packed: {}\n", report.packed));
    output.push_str(&format!("Identity: {}\n", report.identity));
    if let Some(fixed) = &report.fixed_points {
        output.push_str(&format!("Fixed points: {}\n", fixed));
    }

    if let Some(mask) = &report.mask {
        output.push_str(&format!("Mask: {}\n", mask));
    }

    if let Some(p) = &report.permutation {
        output.push('\n');
        output.push_str("Permutation:\n");
        output.push_str(&format!("  Mapping: {}\n", format_mapping(&p.mapping)));
        output.push_str(&format!("  Involution: {}\n", p.involution));
        output.push_str(&format!("  Derangement: {}\n", p.derangement));
        let cycles: Vec<String> = p.cycles.iter().map(|c| format_mapping(c)).collect();
        output.push_str(&format!("  Cycles: {}\n", cycles.join(" ")));
        output.push_str(&format!("  Lehmer code: {}\n", format_mapping(&p.lehmer_code)));
        output.push_str(&format!("  Inversions: {}\n", p.inversion_count));
    }

    output
}

/// Decode a packed integer of the given kind and summarize it
pub fn info_report(kind: TransformKind, packed: &str) -> Result<TransformReport> {
    let transform = Transform::unpack(kind, &parse_unsigned(packed)?)?;
    Ok(report(&transform))
}

/// Decode a packed integer of the given kind and describe it
pub fn show_info(kind: TransformKind, packed: &str) -> Result<String> {
    Ok(format_report(&info_report(kind, packed)?))
}
