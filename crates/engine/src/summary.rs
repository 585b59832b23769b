use api_types::{
    expense::{Category, Expense},
    summary::{CategoryTotal, ExpenseSummary},
};

use crate::{Engine, EngineError, ResultEngine};

fn summarize<'a>(
    expenses: impl IntoIterator<Item = &'a Expense>,
) -> ResultEngine<ExpenseSummary> {
    let mut categories: Vec<CategoryTotal> = Category::ALL
        .into_iter()
        .map(|category| CategoryTotal {
            category,
            count: 0,
            total: 0.0,
        })
        .collect();
    let mut summary = ExpenseSummary::default();

    for expense in expenses {
        summary.count += 1;
        summary.total += expense.input.amount;
        if let Some(slot) = categories
            .iter_mut()
            .find(|slot| slot.category == expense.input.category)
        {
            slot.count += 1;
            slot.total += expense.input.amount;
        }
    }

    // Finite amounts can still sum past `f64::MAX`.
    let finite =
        summary.total.is_finite() && categories.iter().all(|slot| slot.total.is_finite());
    if !finite {
        return Err(EngineError::TotalOutOfRange);
    }

    categories.retain(|slot| slot.count > 0);
    summary.categories = categories;
    Ok(summary)
}

impl Engine {
    /// Totals over every stored expense, overall and per category.
    ///
    /// Fails with [`EngineError::TotalOutOfRange`] when a total does not fit
    /// in an `f64`.
    pub async fn summary(&self) -> ResultEngine<ExpenseSummary> {
        summarize(self.ledger.read().await.expenses.values())
    }
}

#[cfg(test)]
mod tests {
    use api_types::expense::{ExpenseInput, PaymentMethod};

    use super::*;

    fn expense(id: i64, amount: f64, category: Category) -> Expense {
        Expense::from_input(
            ExpenseInput {
                amount,
                category,
                payment_method: PaymentMethod::CreditCard,
                description: None,
            },
            id,
        )
    }

    #[test]
    fn empty_summary() {
        assert_eq!(summarize(&[] as &[Expense]), Ok(ExpenseSummary::default()));
    }

    #[test]
    fn groups_by_category_in_declaration_order() {
        let expenses = [
            expense(1, 10.0, Category::Others),
            expense(2, 2.5, Category::Groceries),
            expense(3, 4.0, Category::Others),
            expense(4, -1.0, Category::Groceries),
        ];

        let summary = summarize(&expenses).unwrap();

        assert_eq!(summary.count, 4);
        assert_eq!(summary.total, 15.5);
        assert_eq!(
            summary.categories,
            vec![
                CategoryTotal {
                    category: Category::Groceries,
                    count: 2,
                    total: 1.5,
                },
                CategoryTotal {
                    category: Category::Others,
                    count: 2,
                    total: 14.0,
                },
            ]
        );
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let expenses = [
            expense(1, f64::MAX, Category::Leisure),
            expense(2, f64::MAX, Category::Health),
        ];

        assert_eq!(summarize(&expenses), Err(EngineError::TotalOutOfRange));
    }

    #[test]
    fn overflowing_category_total_is_an_error() {
        let expenses = [
            expense(1, f64::MAX, Category::Leisure),
            expense(2, -f64::MAX, Category::Health),
            expense(3, f64::MAX, Category::Leisure),
            expense(4, -f64::MAX, Category::Health),
        ];

        assert_eq!(summarize(&expenses), Err(EngineError::TotalOutOfRange));
    }
}
