use crate::types::{NormalizedAnswer, TaskResult};

/// AnswerComparator is a strategy trait for scoring one kind of task.
///
/// Each implementation owns the comparison rule for a single [`crate::types::TaskKind`] variant
/// and receives that variant's typed content. Implementations must never panic and must keep
/// `awarded` within `[0, points]`.
pub trait AnswerComparator: Send + Sync {
    /// The typed content this comparator reads its answer key from.
    type Content;

    /// Compare a normalized answer against the answer key.
    ///
    /// - `task_id`: copied into the result.
    /// - `points`: the task's maximum score.
    /// - `content`: the answer key.
    /// - `answer`: the student's answer, already normalized for this kind.
    fn compare(
        &self,
        task_id: &str,
        points: f64,
        content: &Self::Content,
        answer: &NormalizedAnswer,
    ) -> TaskResult;
}
