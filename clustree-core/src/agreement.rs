//! Agreement scores between consecutive layers.
//!
//! The transition matrix between two layers is their contingency table, so
//! Adjusted Rand Index (ARI) and Normalized Mutual Information (NMI) fall out
//! of the tallies the tree already holds.

use crate::transition::TransitionMatrix;

/// ARI and NMI between layer `from_layer` and the layer after it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerAgreement {
    /// Index of the earlier layer.
    pub from_layer: usize,
    /// Adjusted Rand Index in `[-1.0, 1.0]`.
    pub ari: f64,
    /// Normalized Mutual Information in `[0.0, 1.0]`.
    pub nmi: f64,
}

impl LayerAgreement {
    /// Scores the partition pair summarised by `matrix`.
    #[must_use]
    pub fn from_transition(matrix: &TransitionMatrix) -> Self {
        let marginals = Marginals::from_transition(matrix);
        Self {
            from_layer: matrix.from_layer(),
            ari: adjusted_rand_index(&marginals, matrix),
            nmi: normalized_mutual_information(&marginals, matrix),
        }
    }
}

struct Marginals {
    items: usize,
    rows: Vec<usize>,
    columns: Vec<usize>,
}

impl Marginals {
    fn from_transition(matrix: &TransitionMatrix) -> Self {
        let rows: Vec<usize> = matrix.rows().map(|row| row.iter().sum()).collect();
        let mut columns = vec![0_usize; matrix.to_ids().len()];
        for row in matrix.rows() {
            for (total, &count) in columns.iter_mut().zip(row) {
                *total += count;
            }
        }
        Self {
            items: rows.iter().sum(),
            rows,
            columns,
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "ARI/NMI combinatorics require floating-point arithmetic."
)]
fn comb2(value: usize) -> f64 {
    let as_float = value as f64;
    as_float * (as_float - 1.0) / 2.0
}

#[expect(
    clippy::float_arithmetic,
    reason = "ARI definition requires floating-point arithmetic."
)]
fn adjusted_rand_index(marginals: &Marginals, matrix: &TransitionMatrix) -> f64 {
    if marginals.items < 2 {
        return 1.0;
    }

    let sum_pair_counts: f64 = matrix.rows().flatten().copied().map(comb2).sum();
    let sum_rows: f64 = marginals.rows.iter().copied().map(comb2).sum();
    let sum_columns: f64 = marginals.columns.iter().copied().map(comb2).sum();
    let total = comb2(marginals.items);

    let expected = (sum_rows * sum_columns) / total;
    let max_index = 0.5 * (sum_rows + sum_columns);
    let denominator = max_index - expected;
    if denominator == 0.0 {
        1.0
    } else {
        (sum_pair_counts - expected) / denominator
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "entropy computation requires floating-point arithmetic."
)]
fn entropy(counts: &[usize], items: usize) -> f64 {
    let items_f64 = items as f64;
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let probability = count as f64 / items_f64;
            -probability * probability.ln()
        })
        .sum()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "NMI definition requires floating-point arithmetic."
)]
fn mutual_information(marginals: &Marginals, matrix: &TransitionMatrix) -> f64 {
    let items = marginals.items as f64;
    let mut information = 0.0_f64;
    for (&row_total, row) in marginals.rows.iter().zip(matrix.rows()) {
        for (&column_total, &count) in marginals.columns.iter().zip(row) {
            if count == 0 {
                continue;
            }
            let joint = count as f64;
            information +=
                (joint / items) * ((joint * items) / (row_total as f64 * column_total as f64)).ln();
        }
    }
    information
}

#[expect(
    clippy::float_arithmetic,
    reason = "NMI definition requires floating-point arithmetic."
)]
fn normalized_mutual_information(marginals: &Marginals, matrix: &TransitionMatrix) -> f64 {
    if marginals.items == 0 {
        return 1.0;
    }
    let row_entropy = entropy(&marginals.rows, marginals.items);
    let column_entropy = entropy(&marginals.columns, marginals.items);
    match (row_entropy == 0.0, column_entropy == 0.0) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            mutual_information(marginals, matrix) / (row_entropy * column_entropy).sqrt()
        }
    }
}
