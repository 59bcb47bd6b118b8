#[derive(Debug, Clone, PartialEq)]
pub(super) enum SqlPart {
    Raw(String),
    Param,
}
