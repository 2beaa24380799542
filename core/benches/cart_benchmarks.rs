use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use panier::{BigDecimal, CartContainer, CartLineItem, Identity, MemoryStore, OwnerKey, Product, ProductDetails};
use std::str::FromStr;
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

fn bench_product(id: i64) -> Product {
  Product::new(
    id,
    BigDecimal::from_str("19.99").unwrap(),
    ProductDetails {
      name: Some(format!("Product {}", id)),
      images: vec![format!("https://cdn.example.ma/{}.jpg", id)],
      ..Default::default()
    },
  )
}

async fn filled_cart(lines: i64) -> CartContainer<MemoryStore> {
  let owner = OwnerKey::cart(&Identity::user(1));
  let mut cart = CartContainer::new(Arc::new(MemoryStore::new()));
  for id in 0..lines {
    cart.add_item(&bench_product(id), &owner).await.unwrap();
  }
  cart
}

// --- Pure reducers over in-memory state ---
fn bench_totals(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartTotals");
  let rt = Runtime::new().unwrap();

  for lines in [10_i64, 100, 1000].iter() {
    let cart = rt.block_on(filled_cart(*lines));
    group.throughput(Throughput::Elements(*lines as u64));
    group.bench_with_input(BenchmarkId::new("total_price", lines), &cart, |b, cart| {
      b.iter(|| cart.total_price())
    });
    group.bench_with_input(BenchmarkId::new("total_count", lines), &cart, |b, cart| {
      b.iter(|| cart.total_count())
    });
  }
  group.finish();
}

// --- Read-modify-write including JSON serialization ---
fn bench_add_item(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartAddItem");
  let rt = Runtime::new().unwrap();
  let owner = OwnerKey::cart(&Identity::user(1));

  for existing_lines in [0_i64, 50, 500].iter() {
    group.bench_with_input(
      BenchmarkId::new("into_cart_with_lines", existing_lines),
      existing_lines,
      |b, &existing_lines| {
        // Storage is seeded synchronously so only load + add + persist is measured.
        let seeded: Vec<CartLineItem> = (0..existing_lines)
          .map(|id| CartLineItem::from_product(&bench_product(id)))
          .collect();
        let seeded_json = serde_json::to_string(&seeded).unwrap();
        b.to_async(&rt).iter_batched(
          || {
            let store = MemoryStore::new();
            store.insert_raw(owner.as_str(), seeded_json.clone());
            CartContainer::new(Arc::new(store))
          },
          |mut cart| {
            let owner = owner.clone();
            async move { cart.add_item(&bench_product(existing_lines + 1), &owner).await.unwrap() }
          },
          criterion::BatchSize::SmallInput,
        );
      },
    );
  }
  group.finish();
}

criterion_group!(benches, bench_totals, bench_add_item);
criterion_main!(benches);
