pub mod designs {
    use lazy_static::lazy_static;
    use scraper::Selector;

    lazy_static! {
        pub static ref USER_FEED: Selector = Selector::parse("link[rel=alternate]").unwrap();
    }
}

pub mod listing {
    use lazy_static::lazy_static;
    use scraper::Selector;

    lazy_static! {
        pub static ref THING_LINK: Selector = Selector::parse("a.thing-img-wrapper").unwrap();
        pub static ref THING_NAME: Selector = Selector::parse("span.thing-name").unwrap();
    }
}

pub mod thing {
    use lazy_static::lazy_static;
    use scraper::Selector;

    lazy_static! {
        pub static ref DESCRIPTION: Selector = Selector::parse("#description").unwrap();
        pub static ref INSTRUCTIONS: Selector = Selector::parse("#instructions").unwrap();
        pub static ref CATEGORY: Selector = Selector::parse(".thing-category").unwrap();
        pub static ref TAGS: Selector = Selector::parse(".tags a").unwrap();
        pub static ref LICENSE: Selector = Selector::parse("a[rel=license]").unwrap();
        pub static ref TITLE: Selector = Selector::parse(".thing-header-data h1").unwrap();
        pub static ref CREATOR: Selector = Selector::parse(".thing-header-data h2 a").unwrap();
        pub static ref PUBLISH_DATE: Selector = Selector::parse(".thing-header-data h2 time").unwrap();
        pub static ref IMAGES: Selector = Selector::parse(".thing-page-image img").unwrap();
        pub static ref FILES: Selector = Selector::parse(".thing-file a").unwrap();
        pub static ref FILENAME: Selector = Selector::parse(".filename").unwrap();
    }
}
