use yew::prelude::*;

use crate::services::cancellation::ViewLifetime;

/// A lifetime that ends when the calling component unmounts.
#[hook]
pub fn use_view_lifetime() -> ViewLifetime {
    let lifetime = use_memo((), |_| ViewLifetime::new());

    {
        let lifetime = lifetime.clone();
        use_effect_with((), move |_| move || lifetime.end());
    }

    (*lifetime).clone()
}
