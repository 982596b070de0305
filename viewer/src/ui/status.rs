use bevy::prelude::*;
use motion::{LoadingIndicator, StatusBoard};

/// Single-message status sink shown as a toast.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct StatusFeed(pub StatusBoard);

/// Loading overlay state; fades out once a robot is on screen.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct LoadingOverlay(pub LoadingIndicator);
