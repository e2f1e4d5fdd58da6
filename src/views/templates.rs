use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();

    // Layout + pages
    hb.register_template_file("layouts/base", "templates/layouts/base.hbs")
        .expect("template layouts/base");

    hb.register_template_file("pages/dashboard", "templates/pages/dashboard.hbs")
        .expect("template pages/dashboard");
    hb.register_template_file("pages/not_found", "templates/pages/not_found.hbs")
        .expect("template pages/not_found");

    // Partial endpoints
    hb.register_template_file("partials/market", "templates/partials/market.hbs")
        .expect("template partials/market");

    hb.register_template_file("partials/alert_form", "templates/partials/alert_form.hbs")
        .expect("template partials/alert_form");

    hb.register_template_file("partials/alerts_list", "templates/partials/alerts_list.hbs")
        .expect("template partials/alerts_list");

    hb.register_template_file("partials/notification", "templates/partials/notification.hbs")
        .expect("template partials/notification");

    Arc::new(hb)
}
