//! Annotation builder.

use crate::error::{InterchangeError, MappingErrorKind, Result};
use crate::graph::{Annotation, AnnotationType};
use crate::model::AnnotationInfo;

/// Build an annotation node.
///
/// Annotations are best-effort: callers log and skip on error.
pub fn annotation_to_graph(info: &AnnotationInfo) -> Result<Annotation> {
    if info.annotator.trim().is_empty() {
        return Err(InterchangeError::missing_field("annotator", "annotation"));
    }
    let annotation_type = info.annotation_type.parse::<AnnotationType>().map_err(|message| {
        InterchangeError::mapping(
            "building annotation",
            MappingErrorKind::InvalidValue {
                field: "annotationType".to_string(),
                message,
            },
        )
    })?;

    Ok(Annotation {
        annotator: info.annotator.clone(),
        annotation_type,
        date: info.annotation_date.clone(),
        comment: info.annotation_comment.clone(),
    })
}

pub fn annotation_from_graph(annotation: &Annotation, index: usize) -> AnnotationInfo {
    AnnotationInfo {
        annotator: annotation.annotator.clone(),
        annotation_date: annotation.date.clone(),
        annotation_type: annotation.annotation_type.as_str().to_string(),
        annotation_comment: annotation.comment.clone(),
        index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let info = AnnotationInfo {
            annotator: "Person: Jane".to_string(),
            annotation_date: "2024-03-01T10:00:00Z".to_string(),
            annotation_type: "REVIEW".to_string(),
            annotation_comment: "checked".to_string(),
            index: 2,
        };
        let node = annotation_to_graph(&info).unwrap();
        assert_eq!(node.annotation_type, AnnotationType::Review);
        assert_eq!(annotation_from_graph(&node, 2), info);
    }

    #[test]
    fn test_rejects_missing_annotator_and_unknown_type() {
        let missing = AnnotationInfo {
            annotation_type: "OTHER".to_string(),
            ..Default::default()
        };
        assert!(annotation_to_graph(&missing).is_err());

        let unknown = AnnotationInfo {
            annotator: "Tool: x".to_string(),
            annotation_type: "OPINION".to_string(),
            ..Default::default()
        };
        assert!(annotation_to_graph(&unknown).is_err());
    }
}
