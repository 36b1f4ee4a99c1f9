use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallMetrics {
    pub normalized_error: f64,
    pub correlation: f64,
    pub total_samples: u64,
    pub mse: f64,
    pub rmse: f64,
    pub total_subjects: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMetrics {
    pub subject_id: String,
    pub normalized_error: f64,
    pub correlation: f64,
    pub n_samples: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub overall: OverallMetrics,
    #[serde(default)]
    pub per_subject: Vec<SubjectMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub team: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnScore {
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub paragondao: OwnScore,
    pub total_teams: u32,
}

impl BenchmarkResult {
    /// Rank this system's score would hold on the leaderboard. Lower scores
    /// are better, and a tie with an entry places ahead of it.
    pub fn projected_rank(&self) -> u32 {
        let better = self
            .leaderboard
            .iter()
            .filter(|entry| entry.score < self.paragondao.score)
            .count();
        better as u32 + 1
    }
}

/// Ordinal outcome of a privacy attack, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivacyGrade {
    Weak,
    Moderate,
    Strong,
}

impl PrivacyGrade {
    pub fn rank(self) -> u8 {
        match self {
            Self::Weak => 0,
            Self::Moderate => 1,
            Self::Strong => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "WEAK",
            Self::Moderate => "MODERATE",
            Self::Strong => "STRONG",
        }
    }
}

impl std::fmt::Display for PrivacyGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipInferenceResult {
    pub attack_accuracy: f64,
    pub auc_roc: f64,
    pub grade: PrivacyGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInversionResult {
    pub reconstruction_correlation: f64,
    pub reconstruction_mse: f64,
    pub grade: PrivacyGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeInferenceResult {
    pub advantage_percent: f64,
    pub attack_accuracy: f64,
    pub grade: PrivacyGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivacyAuditResult {
    pub membership_inference: MembershipInferenceResult,
    pub model_inversion: ModelInversionResult,
    pub attribute_inference: AttributeInferenceResult,
    pub overall_grade: PrivacyGrade,
    pub privacy_certified: bool,
    pub tested_at: DateTime<Utc>,
}

impl PrivacyAuditResult {
    /// Folds the three attack results into one audit record. The overall grade
    /// is the weakest individual grade; `tested_at` is the combination time.
    pub fn combine(
        membership_inference: MembershipInferenceResult,
        model_inversion: ModelInversionResult,
        attribute_inference: AttributeInferenceResult,
        tested_at: DateTime<Utc>,
    ) -> Self {
        let overall_grade = membership_inference
            .grade
            .min(model_inversion.grade)
            .min(attribute_inference.grade);
        Self {
            membership_inference,
            model_inversion,
            attribute_inference,
            overall_grade,
            privacy_certified: overall_grade != PrivacyGrade::Weak,
            tested_at,
        }
    }
}
