//! The standard Bootstrap modifier groups.
//!
//! One factory per themeable widget family. The declarations mirror the
//! framework's variable sheet; they are data, not logic.

use crate::store::{Modifier, ModifierGroup};

/// Every standard group, in the order the editor presents them.
pub fn standard_groups() -> Vec<ModifierGroup> {
    vec![
        colors(),
        typography(),
        layout(),
        buttons(),
        navbar(),
        forms(),
        panels(),
        labels_badges(),
        breadcrumbs(),
        dropdowns(),
        tables(),
    ]
}

/// Brand palette and link colors.
pub fn colors() -> ModifierGroup {
    ModifierGroup::new("colors")
        .add(Modifier::new("@brand-primary"))
        .add(Modifier::new("@brand-success"))
        .add(Modifier::new("@brand-info"))
        .add(Modifier::new("@brand-warning"))
        .add(Modifier::new("@brand-danger"))
        .add(Modifier::new("@body-bg"))
        .add(Modifier::new("@text-color"))
        .add(Modifier::new("@link-color"))
        .add(Modifier::new("@link-hover-color"))
}

pub fn typography() -> ModifierGroup {
    ModifierGroup::new("typography")
        .add(Modifier::new("@font-family-sans-serif"))
        .add(Modifier::new("@font-family-serif"))
        .add(Modifier::new("@font-family-monospace"))
        .add(Modifier::suffixed("@font-size-base", None))
        .add(Modifier::suffixed("@font-size-large", None))
        .add(Modifier::suffixed("@font-size-small", None))
        .add(Modifier::new("@line-height-base"))
        .add(Modifier::new("@headings-font-family"))
        .add(Modifier::new("@headings-font-weight"))
        .add(Modifier::new("@headings-color"))
}

pub fn layout() -> ModifierGroup {
    ModifierGroup::new("layout")
        .add(Modifier::suffixed("@grid-gutter-width", None))
        .add(Modifier::new("@grid-columns"))
        .add(Modifier::suffixed("@container-large-desktop", None))
        .add(Modifier::suffixed("@padding-base-vertical", None))
        .add(Modifier::suffixed("@padding-base-horizontal", None))
        .add(Modifier::suffixed("@border-radius-base", None))
        .add(Modifier::suffixed("@border-radius-large", None))
        .add(Modifier::suffixed("@border-radius-small", None))
}

pub fn buttons() -> ModifierGroup {
    ModifierGroup::new("buttons")
        .add(Modifier::new("@btn-font-weight"))
        .add(Modifier::new("@btn-default-color"))
        .add(Modifier::new("@btn-default-bg"))
        .add(Modifier::new("@btn-default-border"))
        .add(Modifier::new("@btn-primary-color"))
        .add(Modifier::new("@btn-primary-bg"))
        .add(Modifier::new("@btn-primary-border"))
        .add(Modifier::new("@btn-success-bg"))
        .add(Modifier::new("@btn-info-bg"))
        .add(Modifier::new("@btn-warning-bg"))
        .add(Modifier::new("@btn-danger-bg"))
}

pub fn navbar() -> ModifierGroup {
    ModifierGroup::new("navbar")
        .add(Modifier::suffixed("@navbar-height", None))
        .add(Modifier::suffixed("@navbar-margin-bottom", None))
        .add(Modifier::suffixed("@navbar-padding-horizontal", None))
        .add(Modifier::suffixed("@navbar-padding-vertical", None))
        .add(Modifier::new("@navbar-default-color"))
        .add(Modifier::new("@navbar-default-bg"))
        .add(Modifier::new("@navbar-default-border"))
        .add(Modifier::new("@navbar-default-link-color"))
        .add(Modifier::new("@navbar-default-link-hover-color"))
        .add(Modifier::new("@navbar-default-link-active-color"))
        .add(Modifier::new("@navbar-inverse-color"))
        .add(Modifier::new("@navbar-inverse-bg"))
        .add(Modifier::new("@navbar-inverse-link-color"))
}

pub fn forms() -> ModifierGroup {
    ModifierGroup::new("forms")
        .add(Modifier::new("@input-bg"))
        .add(Modifier::new("@input-color"))
        .add(Modifier::new("@input-border"))
        .add(Modifier::suffixed("@input-border-radius", None))
        .add(Modifier::new("@input-border-focus"))
        .add(Modifier::new("@input-color-placeholder"))
        .add(Modifier::suffixed("@input-height-base", None))
        .add(Modifier::new("@legend-color"))
        .add(Modifier::new("@legend-border-color"))
}

pub fn panels() -> ModifierGroup {
    ModifierGroup::new("panels")
        .add(Modifier::new("@panel-bg"))
        .add(Modifier::suffixed("@panel-body-padding", None))
        .add(Modifier::suffixed("@panel-border-radius", None))
        .add(Modifier::new("@panel-inner-border"))
        .add(Modifier::new("@panel-footer-bg"))
        .add(Modifier::new("@panel-default-text"))
        .add(Modifier::new("@panel-default-border"))
        .add(Modifier::new("@panel-default-heading-bg"))
        .add(Modifier::new("@panel-primary-text"))
        .add(Modifier::new("@panel-primary-border"))
        .add(Modifier::new("@panel-primary-heading-bg"))
}

pub fn labels_badges() -> ModifierGroup {
    ModifierGroup::new("labels-badges")
        .add(Modifier::new("@label-default-bg"))
        .add(Modifier::new("@label-primary-bg"))
        .add(Modifier::new("@label-success-bg"))
        .add(Modifier::new("@label-info-bg"))
        .add(Modifier::new("@label-warning-bg"))
        .add(Modifier::new("@label-danger-bg"))
        .add(Modifier::new("@label-color"))
        .add(Modifier::new("@badge-color"))
        .add(Modifier::new("@badge-bg"))
        .add(Modifier::suffixed("@badge-border-radius", None))
}

pub fn breadcrumbs() -> ModifierGroup {
    ModifierGroup::new("breadcrumbs")
        .add(Modifier::suffixed("@breadcrumb-padding-vertical", None))
        .add(Modifier::suffixed("@breadcrumb-padding-horizontal", None))
        .add(Modifier::new("@breadcrumb-bg"))
        .add(Modifier::new("@breadcrumb-color"))
        .add(Modifier::new("@breadcrumb-active-color"))
        .add(Modifier::new("@breadcrumb-separator"))
}

pub fn dropdowns() -> ModifierGroup {
    ModifierGroup::new("dropdowns")
        .add(Modifier::new("@dropdown-bg"))
        .add(Modifier::new("@dropdown-border"))
        .add(Modifier::new("@dropdown-divider-bg"))
        .add(Modifier::new("@dropdown-link-color"))
        .add(Modifier::new("@dropdown-link-hover-color"))
        .add(Modifier::new("@dropdown-link-hover-bg"))
        .add(Modifier::new("@dropdown-link-active-color"))
        .add(Modifier::new("@dropdown-link-active-bg"))
        .add(Modifier::new("@dropdown-header-color"))
}

pub fn tables() -> ModifierGroup {
    ModifierGroup::new("tables")
        .add(Modifier::suffixed("@table-cell-padding", None))
        .add(Modifier::suffixed("@table-condensed-cell-padding", None))
        .add(Modifier::new("@table-bg"))
        .add(Modifier::new("@table-bg-accent"))
        .add(Modifier::new("@table-bg-hover"))
        .add(Modifier::new("@table-border-color"))
}
