/// Declare a descriptor type together with its field tokens.
///
/// ```
/// use screen_keys::descriptor;
/// use screen_keys::descriptor::StaticText;
///
/// descriptor! {
///     /// One row of a listing.
///     pub view Row [Selectable] {
///         field TITLE: StaticText = "title";
///     }
/// }
///
/// descriptor! {
///     pub screen Listing {
///         list ITEMS: Row = "items";
///     }
/// }
///
/// assert_eq!(Listing::ITEMS.identifier().as_str(), "Listing.items");
/// assert_eq!(Row::TITLE.identifier().as_str(), "Row.title");
/// ```
///
/// The kind is one of `screen`, `view`, `group` or `any`. Types declared inside
/// another descriptor's namespace pass their nesting chain with
/// `as "Outer.Inner"`; otherwise the type's own name is used. Capabilities in
/// brackets implement the matching marker traits.
#[macro_export]
macro_rules! descriptor {
    (@qualified $name:ident) => {
        concat!(module_path!(), "::", stringify!($name))
    };
    (@qualified $name:ident $qualified:literal) => {
        concat!(module_path!(), "::", $qualified)
    };

    (@kind screen) => { $crate::descriptor::NodeKind::Screen };
    (@kind view) => { $crate::descriptor::NodeKind::View };
    (@kind group) => { $crate::descriptor::NodeKind::Group };
    (@kind any) => { $crate::descriptor::NodeKind::Any };

    (@flag Text) => { $crate::descriptor::Capabilities::TEXT };
    (@flag Image) => { $crate::descriptor::Capabilities::IMAGE };
    (@flag Editable) => { $crate::descriptor::Capabilities::EDITABLE };
    (@flag Selectable) => { $crate::descriptor::Capabilities::SELECTABLE };
    (@flag Disableable) => { $crate::descriptor::Capabilities::DISABLEABLE };
    (@flag Swipeable) => { $crate::descriptor::Capabilities::SWIPEABLE };
    (@flag Pinchable) => { $crate::descriptor::Capabilities::PINCHABLE };
    (@flag Rotatable) => { $crate::descriptor::Capabilities::ROTATABLE };

    (@node field $field:literal, $target:expr) => {
        $crate::descriptor::FieldNode::single($field, $target)
    };
    (@node list $field:literal, $target:expr) => {
        $crate::descriptor::FieldNode::list($field, $target)
    };

    (@member field $konst:ident, $ty:ty, $field:literal) => {
        pub const $konst: $crate::descriptor::Field<Self, $ty> =
            $crate::descriptor::Field::new($field);
    };
    (@member list $konst:ident, $ty:ty, $field:literal) => {
        pub const $konst: $crate::descriptor::ListField<Self, $ty> =
            $crate::descriptor::ListField::new($field);
    };

    (
        $(#[$meta:meta])*
        $vis:vis $kind:ident $name:ident $(as $qualified:literal)? $([ $($cap:ident),* $(,)? ])? {
            $( $member:ident $konst:ident : $ty:ty = $field:literal; )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $name;

        impl $crate::descriptor::Descriptor for $name {
            const TYPE_NAME: &'static str = $crate::descriptor!(@qualified $name $($qualified)?);
            const KIND: $crate::descriptor::NodeKind = $crate::descriptor!(@kind $kind);
            const CAPABILITIES: $crate::descriptor::Capabilities =
                $crate::descriptor::Capabilities::empty()
                    $($( .union($crate::descriptor!(@flag $cap)) )*)?;

            fn register(tree: &mut $crate::descriptor::DescriptorTree) {
                let fields = ::std::vec![
                    $(
                        $crate::descriptor!(
                            @node $member $field,
                            <$ty as $crate::descriptor::Descriptor>::TYPE_NAME
                        )
                    ),*
                ];
                if tree.begin::<Self>(fields) {
                    $( <$ty as $crate::descriptor::Descriptor>::register(tree); )*
                }
            }
        }

        $($( impl $crate::descriptor::$cap for $name {} )*)?

        impl $name {
            $( $crate::descriptor!(@member $member $konst, $ty, $field); )*
        }
    };
}
