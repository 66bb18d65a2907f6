use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextMuted,

    // Form
    GroupHeading,
    FieldLabel,
    FieldValue,
    FieldFocus,
    UnitText,

    // Result box
    OutputBorder,
    OutputText,
    CopyButton,
    CopyButtonText,

    // Status / toast
    StatusOk,
    StatusError,
}
