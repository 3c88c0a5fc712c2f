use crate::descriptor;

descriptor! {
    /// A rendered piece of static text, or a container whose first static-text
    /// child carries the text.
    pub view StaticText [Text] {}
}

descriptor! {
    /// A rendered image, or a container whose first image child carries the label.
    pub view StaticImage [Image] {}
}

descriptor! {
    /// An element whose concrete descriptor is only known to the caller. Narrow
    /// it with `Element::cast` before using typed operations.
    pub any AnyView {}
}
