//! Evaluation metrics for the binary classifiers.

use serde::{Deserialize, Serialize};

/// Fraction of predictions matching the labels.
pub fn accuracy(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().min(y_pred.len());
    if n == 0 {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .take(n)
        .filter(|(t, p)| is_positive(**t) == is_positive(**p))
        .count();
    correct as f64 / n as f64
}

/// precision = TP / (TP + FP)
pub fn precision(y_true: &[f64], y_pred: &[f64], positive: bool) -> f64 {
    let (tp, fp, _, _) = confusion_counts(y_true, y_pred, positive);
    if tp + fp == 0 {
        0.0
    } else {
        tp as f64 / (tp + fp) as f64
    }
}

/// recall = TP / (TP + FN)
pub fn recall(y_true: &[f64], y_pred: &[f64], positive: bool) -> f64 {
    let (tp, _, fn_, _) = confusion_counts(y_true, y_pred, positive);
    if tp + fn_ == 0 {
        0.0
    } else {
        tp as f64 / (tp + fn_) as f64
    }
}

/// F1 = 2 * (precision * recall) / (precision + recall)
pub fn f1_score(y_true: &[f64], y_pred: &[f64], positive: bool) -> f64 {
    let p = precision(y_true, y_pred, positive);
    let r = recall(y_true, y_pred, positive);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Area under the ROC curve, computed from score ranks with tie
/// averaging (Mann-Whitney U). Returns 0.5 when only one class is
/// present.
pub fn roc_auc(y_true: &[f64], y_score: &[f64]) -> f64 {
    let n = y_true.len().min(y_score.len());
    let n_pos = y_true.iter().take(n).filter(|&&l| is_positive(l)).count();
    let n_neg = n - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return 0.5;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| y_score[a].total_cmp(&y_score[b]));

    // Average ranks over tied scores (1-based ranks)
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && y_score[order[j + 1]] == y_score[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let rank_sum_pos: f64 = (0..n)
        .filter(|&i| is_positive(y_true[i]))
        .map(|i| ranks[i])
        .sum();

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    (rank_sum_pos - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg)
}

/// Per-class precision/recall/F1 with support, in the style of a
/// classification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub class: u8,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

pub fn classification_report(y_true: &[f64], y_pred: &[f64]) -> Vec<ClassMetrics> {
    [false, true]
        .iter()
        .map(|&positive| ClassMetrics {
            class: u8::from(positive),
            precision: precision(y_true, y_pred, positive),
            recall: recall(y_true, y_pred, positive),
            f1: f1_score(y_true, y_pred, positive),
            support: y_true.iter().filter(|&&l| is_positive(l) == positive).count(),
        })
        .collect()
}

fn is_positive(label: f64) -> bool {
    label > 0.5
}

/// (TP, FP, FN, TN) treating `positive` as the positive class.
fn confusion_counts(y_true: &[f64], y_pred: &[f64], positive: bool) -> (usize, usize, usize, usize) {
    let mut tp = 0;
    let mut fp = 0;
    let mut fn_ = 0;
    let mut tn = 0;

    for (t, p) in y_true.iter().zip(y_pred.iter()) {
        let actual = is_positive(*t) == positive;
        let predicted = is_positive(*p) == positive;
        match (actual, predicted) {
            (true, true) => tp += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (false, false) => tn += 1,
        }
    }

    (tp, fp, fn_, tn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_basic() {
        let y_true = vec![1.0, 0.0, 1.0, 0.0];
        let y_pred = vec![1.0, 0.0, 0.0, 0.0];
        assert!((accuracy(&y_true, &y_pred) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_precision_recall_f1() {
        // TP=2, FP=1, FN=1, TN=2 for the positive class
        let y_true = vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        let y_pred = vec![1.0, 1.0, 0.0, 1.0, 0.0, 0.0];

        assert!((precision(&y_true, &y_pred, true) - 2.0 / 3.0).abs() < 1e-12);
        assert!((recall(&y_true, &y_pred, true) - 2.0 / 3.0).abs() < 1e-12);
        assert!((f1_score(&y_true, &y_pred, true) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_perfect_ranking() {
        let y_true = vec![0.0, 0.0, 1.0, 1.0];
        let y_score = vec![0.1, 0.2, 0.8, 0.9];
        assert!((roc_auc(&y_true, &y_score) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_inverted_ranking() {
        let y_true = vec![1.0, 1.0, 0.0, 0.0];
        let y_score = vec![0.1, 0.2, 0.8, 0.9];
        assert!(roc_auc(&y_true, &y_score).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_ties_average() {
        let y_true = vec![0.0, 1.0];
        let y_score = vec![0.5, 0.5];
        assert!((roc_auc(&y_true, &y_score) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_single_class() {
        let y_true = vec![1.0, 1.0];
        let y_score = vec![0.2, 0.9];
        assert_eq!(roc_auc(&y_true, &y_score), 0.5);
    }

    #[test]
    fn test_classification_report_supports() {
        let y_true = vec![1.0, 0.0, 0.0];
        let y_pred = vec![1.0, 0.0, 1.0];
        let report = classification_report(&y_true, &y_pred);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].class, 0);
        assert_eq!(report[0].support, 2);
        assert_eq!(report[1].class, 1);
        assert_eq!(report[1].support, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<f64> = vec![];
        assert_eq!(accuracy(&empty, &empty), 0.0);
        assert_eq!(roc_auc(&empty, &empty), 0.5);
    }
}
