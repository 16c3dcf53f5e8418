/// A fetched value and where its fetch stands. A failed fetch renders the
/// same as an empty one; the variant exists so callers can tell them apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    Failed,
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// The loaded rows, or nothing while loading or after a failure.
    pub fn rows(&self) -> &[T] {
        self.ready().map_or(&[], Vec::as_slice)
    }
}
