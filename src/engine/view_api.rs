use super::Engine;

use async_trait::async_trait;

use crate::{
    api::ViewAPI,
    entities::{UiFlags, ViewState},
    error::Error,
    map::Layout,
};

#[async_trait]
impl ViewAPI for Engine {
    async fn snapshot(&self) -> Result<ViewState, Error> {
        Ok(self.state.lock().await.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_sidebar(&self) -> Result<UiFlags, Error> {
        let mut state = self.state.lock().await;
        state.toggle_sidebar();

        Ok(state.flags.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn toggle_debug(&self) -> Result<UiFlags, Error> {
        let mut state = self.state.lock().await;
        let overlay = if state.toggle_debug() { "on" } else { "off" };

        tracing::info!("debug overlay {}", overlay);

        Ok(state.flags.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn set_layout(&self, layout: Layout) -> Result<UiFlags, Error> {
        let mut state = self.state.lock().await;
        state.set_mobile(layout == Layout::Mobile);

        Ok(state.flags.clone())
    }
}
