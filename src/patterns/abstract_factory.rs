//! Abstract Factory detector.
//!
//! Abstract Factory is a creational pattern for producing families of
//! related objects without specifying their concrete classes.
//!
//! Role assignment:
//! - AbstractFactory: an interface with at least one method returning
//!   another known interface
//! - AbstractProduct: each such returned interface
//! - ConcreteFactory: implementors of the AbstractFactory
//! - ConcreteProduct: implementors/extenders of an AbstractProduct
//!
//! Products with no concrete products are left out of the evidence; the
//! factory itself is reported as soon as it creates at least one known
//! abstract product.

use super::{AbstractFactoryRoles, PatternDetector, PatternEvidence};
use crate::model::CodeModel;
use std::collections::{BTreeMap, BTreeSet};

pub struct AbstractFactoryDetector;

impl AbstractFactoryDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AbstractFactoryDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for AbstractFactoryDetector {
    fn name(&self) -> &'static str {
        "abstract_factory"
    }

    fn detect(&self, model: &CodeModel) -> PatternEvidence {
        let mut factories = BTreeMap::new();

        for factory in model.types().filter(|t| t.is_interface) {
            let products: BTreeSet<&str> = factory
                .methods
                .iter()
                .filter_map(|m| model.get(&m.return_type))
                .filter(|p| p.is_interface && p.name != factory.name)
                .map(|p| p.name.as_str())
                .collect();
            if products.is_empty() {
                continue;
            }

            let concrete_factory: BTreeSet<String> = model
                .implementors(&factory.name)
                .map(|t| t.name.clone())
                .collect();

            let mut abstract_product = BTreeMap::new();
            for product in products {
                let concrete: BTreeSet<String> =
                    model.subtypes(product).map(|t| t.name.clone()).collect();
                if !concrete.is_empty() {
                    abstract_product.insert(product.to_string(), concrete);
                }
            }

            factories.insert(
                factory.name.clone(),
                AbstractFactoryRoles {
                    concrete_factory,
                    abstract_product,
                },
            );
        }

        PatternEvidence::AbstractFactory(factories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::fixtures::*;

    /// GuiFactory creates Button and Checkbox; two platform families
    /// implement the whole set.
    fn gui_model() -> CodeModel {
        let mut model = CodeModel::new();

        let mut factory = interface("GuiFactory");
        factory
            .methods
            .push(method("createButton", "Button", &["public"]));
        factory
            .methods
            .push(method("createCheckbox", "Checkbox", &["public"]));
        model.insert(factory);

        model.insert(interface("Button"));
        model.insert(interface("Checkbox"));
        model.insert(implementing("MacFactory", &["GuiFactory"]));
        model.insert(implementing("WinFactory", &["GuiFactory"]));
        model.insert(implementing("MacButton", &["Button"]));
        model.insert(implementing("WinButton", &["Button"]));
        model.insert(implementing("MacCheckbox", &["Checkbox"]));
        model.insert(implementing("WinCheckbox", &["Checkbox"]));
        model
    }

    fn detect(model: &CodeModel) -> BTreeMap<String, AbstractFactoryRoles> {
        match AbstractFactoryDetector::new().detect(model) {
            PatternEvidence::AbstractFactory(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn gui_fixture_nests_products_under_the_factory() {
        let factories = detect(&gui_model());

        let roles = &factories["GuiFactory"];
        assert_eq!(
            roles.concrete_factory,
            ["MacFactory", "WinFactory"].map(String::from).into()
        );
        assert_eq!(
            roles.abstract_product["Button"],
            ["MacButton", "WinButton"].map(String::from).into()
        );
        assert_eq!(
            roles.abstract_product["Checkbox"],
            ["MacCheckbox", "WinCheckbox"].map(String::from).into()
        );
    }

    #[test]
    fn factory_must_be_an_interface() {
        let mut model = gui_model();
        let mut factory = model.get("GuiFactory").unwrap().clone();
        factory.is_interface = false;
        model.insert(factory);

        assert!(!detect(&model).contains_key("GuiFactory"));
    }

    #[test]
    fn product_must_be_a_known_interface() {
        let mut model = CodeModel::new();
        let mut factory = interface("GuiFactory");
        factory
            .methods
            .push(method("createButton", "Button", &["public"]));
        model.insert(factory);

        // Button is a class, not an interface.
        model.insert(class("Button"));
        model.insert(implementing("MacFactory", &["GuiFactory"]));

        assert!(detect(&model).is_empty());
    }

    #[test]
    fn factory_returning_itself_is_not_its_own_product() {
        let mut model = CodeModel::new();
        let mut factory = interface("Builder");
        factory.methods.push(method("self_", "Builder", &["public"]));
        model.insert(factory);

        assert!(detect(&model).is_empty());
    }

    #[test]
    fn products_without_implementations_are_omitted() {
        let mut model = gui_model();
        // Remove every Checkbox implementation.
        let mut mac = class("MacCheckbox");
        mac.implements.clear();
        model.insert(mac);
        let mut win = class("WinCheckbox");
        win.implements.clear();
        model.insert(win);

        let factories = detect(&model);
        let roles = &factories["GuiFactory"];
        assert!(roles.abstract_product.contains_key("Button"));
        assert!(!roles.abstract_product.contains_key("Checkbox"));
    }

    #[test]
    fn extenders_count_as_concrete_products() {
        let mut model = gui_model();
        model.insert(extending("FancyButton", &["Button"]));

        let factories = detect(&model);
        assert!(factories["GuiFactory"].abstract_product["Button"].contains("FancyButton"));
    }
}
