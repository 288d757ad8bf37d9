pub mod coinmarketcap;
pub mod fear_greed;

pub use coinmarketcap::CoinMarketCapClient;
pub use fear_greed::FearGreedClient;
