// Human-readable labels for arXiv category codes.
//
// Only a handful of codes have a translation; everything else is reported
// as a single catch-all bucket so the category chart stays readable.

use serde::Serialize;

/// Label used for any code not in the table.
pub const OTHER_CATEGORY: &str = "Outra categoria";

const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("cs.CL", "Ciência da Computação: Computação e Linguagem"),
    ("math.OC", "Matemática: Otimização e Controle"),
    ("stat.ML", "Estatística: Machine Learning"),
    ("physics.comp-ph", "Física: Computação Física"),
    ("q-bio.NC", "Biologia Quantitativa: Neurociência Computacional"),
];

/// Map a category code to its label. Total: unknown codes map to
/// [`OTHER_CATEGORY`].
pub fn label(code: &str) -> &'static str {
    CATEGORY_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, l)| *l)
        .unwrap_or(OTHER_CATEGORY)
}

/// How many items fall under one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: &'static str,
    pub count: usize,
}

/// Count labels for a sequence of codes, in order of first appearance.
pub fn count_labels<'a, I>(codes: I) -> Vec<LabelCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<LabelCount> = Vec::new();
    for code in codes {
        let l = label(code);
        match counts.iter_mut().find(|c| c.label == l) {
            Some(existing) => existing.count += 1,
            None => counts.push(LabelCount { label: l, count: 1 }),
        }
    }
    counts
}
