mod common;

use common::{activations_list, feature_labels, tokens};
use saevis::{
    SaeVisOptions, sae_vis,
    render::{BUNDLE_PATH_ENV, CDN_URL_ENV, DEFAULT_CDN_URL},
};

#[test]
fn test_sae_vis_default_renderer_uses_cdn() {
    // SAFETY: the only test in this binary, nothing else reads the environment.
    unsafe {
        std::env::remove_var(BUNDLE_PATH_ENV);
        std::env::remove_var(CDN_URL_ENV);
    }

    let rendered = sae_vis(
        tokens(),
        activations_list(),
        feature_labels(),
        SaeVisOptions::default(),
    )
    .unwrap();

    assert!(rendered.local_src().is_none());
    assert_eq!(rendered.html(), rendered.cdn_src());
    assert!(rendered.cdn_src().contains(DEFAULT_CDN_URL));
    assert!(rendered.cdn_src().contains(rendered.mount_id()));
    assert!(rendered.mount_id().starts_with("circuits-vis-"));
    assert_eq!(rendered.props()["featureIDs"][9], 9);
}
