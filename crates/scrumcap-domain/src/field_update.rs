/// Three-state edit of an optional sprint or resource field.
///
/// - `NoChange`: keep the stored value
/// - `Set(value)`: replace it
/// - `Clear`: reset it to `None`
///
/// # Example
///
/// ```
/// use scrumcap_domain::FieldUpdate;
///
/// let mut objective = Some("Ship the importer".to_string());
/// FieldUpdate::Set("Stabilise CI".to_string()).apply_to(&mut objective);
/// assert_eq!(objective.as_deref(), Some("Stabilise CI"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut objective);
/// assert_eq!(objective, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` sets the field, `None` clears it.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}
