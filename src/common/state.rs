use crate::view::ViewHandle;

#[derive(Clone)]
pub struct AppState {
    pub view: ViewHandle,
}

impl AppState {
    pub fn new(view: ViewHandle) -> Self {
        Self { view }
    }
}
