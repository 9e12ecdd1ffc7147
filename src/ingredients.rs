/// Ingredients the user has typed in so far, in entry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientList {
    items: Vec<String>,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split comma-separated input into an ingredient list
    ///
    /// # Example
    /// ```
    /// use reciplease::IngredientList;
    ///
    /// let list = IngredientList::parse("lemon, cheese,,  potatoes ");
    /// assert_eq!(list.as_slice(), ["lemon", "cheese", "potatoes"]);
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut list = Self::new();
        for part in text.split(',') {
            list.add(part);
        }
        list
    }

    /// Append an ingredient. Blank input is ignored.
    ///
    /// Returns whether the ingredient was added.
    pub fn add(&mut self, ingredient: &str) -> bool {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return false;
        }
        self.items.push(ingredient.to_string());
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Searching with no ingredients only yields noise, so the search action stays disabled
    pub fn can_search(&self) -> bool {
        !self.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl<S: AsRef<str>> Extend<S> for IngredientList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.add(item.as_ref());
        }
    }
}
