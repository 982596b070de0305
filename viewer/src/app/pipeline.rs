use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum ViewerPipelineSet {
    Input,
    AssetLoad,
    Motion,
    Present,
    Camera,
}

pub fn configure_viewer_pipeline(app: &mut App) {
    app.configure_sets(
        Update,
        (
            ViewerPipelineSet::Input,
            ViewerPipelineSet::AssetLoad,
            ViewerPipelineSet::Motion,
            ViewerPipelineSet::Present,
            ViewerPipelineSet::Camera,
        )
            .chain(),
    );
}
