use api_types::expense::{Expense, ExpenseInput};

use crate::{Engine, EngineError, ResultEngine};

impl Engine {
    /// Store `input` under the next free id and return the new record.
    pub async fn create_expense(&self, input: ExpenseInput) -> ResultEngine<Expense> {
        let mut ledger = self.ledger.write().await;
        let id = ledger.allocate_id()?;
        let expense = Expense::from_input(input, id);
        ledger.expenses.insert(id, expense.clone());
        tracing::debug!(id, "expense created");
        Ok(expense)
    }

    /// All expenses, ascending by id.
    pub async fn list_expenses(&self) -> Vec<Expense> {
        self.ledger.read().await.expenses.values().cloned().collect()
    }

    pub async fn expense(&self, id: i64) -> ResultEngine<Expense> {
        self.ledger
            .read()
            .await
            .expenses
            .get(&id)
            .cloned()
            .ok_or(EngineError::KeyNotFound(id))
    }

    /// Replace every input field of expense `id`. The id is kept.
    pub async fn update_expense(&self, id: i64, input: ExpenseInput) -> ResultEngine<Expense> {
        let mut ledger = self.ledger.write().await;
        let expense = ledger
            .expenses
            .get_mut(&id)
            .ok_or(EngineError::KeyNotFound(id))?;
        expense.input = input;
        tracing::debug!(id, "expense updated");
        Ok(expense.clone())
    }

    /// Remove expense `id`, returning the removed record.
    pub async fn delete_expense(&self, id: i64) -> ResultEngine<Expense> {
        let removed = self
            .ledger
            .write()
            .await
            .expenses
            .remove(&id)
            .ok_or(EngineError::KeyNotFound(id))?;
        tracing::debug!(id, "expense deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use api_types::expense::{Category, PaymentMethod};

    use super::*;

    fn input(amount: f64, category: Category) -> ExpenseInput {
        ExpenseInput {
            amount,
            category,
            payment_method: PaymentMethod::Cash,
            description: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let engine = Engine::builder().build();

        let first = engine.create_expense(input(1.0, Category::Groceries)).await.unwrap();
        let second = engine.create_expense(input(2.0, Category::Leisure)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn deleted_ids_are_not_reused() {
        let engine = Engine::builder().build();
        let first = engine.create_expense(input(1.0, Category::Health)).await.unwrap();

        engine.delete_expense(first.id).await.unwrap();
        let next = engine.create_expense(input(1.0, Category::Health)).await.unwrap();

        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn max_id_is_assigned_before_exhaustion() {
        let engine = Engine::builder().first_id(i64::MAX - 1).build();

        let second_last = engine.create_expense(input(1.0, Category::Others)).await.unwrap();
        let last = engine.create_expense(input(1.0, Category::Others)).await.unwrap();
        let err = engine
            .create_expense(input(1.0, Category::Others))
            .await
            .unwrap_err();

        assert_eq!(second_last.id, i64::MAX - 1);
        assert_eq!(last.id, i64::MAX);
        assert_eq!(err, EngineError::IdsExhausted(i64::MAX));
        assert_eq!(engine.list_expenses().await.len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let engine = Engine::builder().build();

        assert_eq!(engine.expense(3).await, Err(EngineError::KeyNotFound(3)));
        assert_eq!(
            engine.update_expense(3, input(1.0, Category::Others)).await,
            Err(EngineError::KeyNotFound(3))
        );
        assert_eq!(engine.delete_expense(3).await, Err(EngineError::KeyNotFound(3)));
    }
}
